use glam::Vec4;
use rayon::prelude::*;

use crate::field::Field2d;

/// Runs `kernel` once per texel of a `width` x `height` grid and collects
/// the results into a [`Field2d`].
///
/// Each invocation depends only on its own coordinate and writes only its
/// own output slot, so rows are dispatched across the thread pool in any
/// order; a single-threaded loop would produce the identical field.
pub fn par_texel_map<F>(width: u32, height: u32, kernel: F) -> Field2d
where
    F: Fn(u32, u32) -> Vec4 + Sync,
{
    let mut texels = vec![[0.0f32; 4]; (width as usize) * (height as usize)];
    texels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, texel) in row.iter_mut().enumerate() {
                *texel = kernel(x as u32, y as u32).to_array();
            }
        });
    Field2d::from_texels(width, height, texels)
}
