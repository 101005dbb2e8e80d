use glam::Vec4;

/// CPU-resident 4-channel float texel grid, the storage behind the weather
/// map, the volume noise atlases and rendered frames.
///
/// Sampling uses hardware conventions: texel centers at (i + 0.5) / size,
/// bilinear filtering, clamp-to-edge addressing.
#[derive(Clone, Debug, PartialEq)]
pub struct Field2d {
    width: u32,
    height: u32,
    texels: Vec<[f32; 4]>,
}

impl Field2d {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            texels: vec![[0.0; 4]; (width as usize) * (height as usize)],
        }
    }

    pub fn from_texels(width: u32, height: u32, texels: Vec<[f32; 4]>) -> Self {
        assert_eq!(texels.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            texels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texels(&self) -> &[[f32; 4]] {
        &self.texels
    }

    /// Raw texel fetch; `x` and `y` must be in range.
    pub fn texel(&self, x: u32, y: u32) -> Vec4 {
        Vec4::from_array(self.texels[(y * self.width + x) as usize])
    }

    pub fn set_texel(&mut self, x: u32, y: u32, value: Vec4) {
        self.texels[(y * self.width + x) as usize] = value.to_array();
    }

    /// Bilinearly filtered fetch at normalized (u, v), clamp-to-edge.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> Vec4 {
        let x = u * self.width as f32 - 0.5;
        let y = v * self.height as f32 - 0.5;
        let fx = x - x.floor();
        let fy = y - y.floor();

        let x0 = clamp_index(x.floor(), self.width);
        let x1 = clamp_index(x.floor() + 1.0, self.width);
        let y0 = clamp_index(y.floor(), self.height);
        let y1 = clamp_index(y.floor() + 1.0, self.height);

        let t00 = self.texel(x0, y0);
        let t10 = self.texel(x1, y0);
        let t01 = self.texel(x0, y1);
        let t11 = self.texel(x1, y1);

        let top = t00 + (t10 - t00) * fx;
        let bottom = t01 + (t11 - t01) * fx;
        top + (bottom - top) * fy
    }
}

fn clamp_index(v: f32, size: u32) -> u32 {
    (v.max(0.0) as u32).min(size - 1)
}
