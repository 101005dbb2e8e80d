//! Renders one frame of the default cloud layer plus the generated fields
//! to PNG files for inspection.

use glam::Vec3;
use image::{Rgba, RgbaImage};

use cumulus::{Camera, CloudConfig, CloudRenderer, Field2d};

const FRAME_WIDTH: u32 = 640;
const FRAME_HEIGHT: u32 = 360;
const SKY_COLOR: Vec3 = Vec3::new(0.35, 0.55, 0.85);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = CloudConfig {
        coverage: 0.95,
        density: 0.9,
        ..CloudConfig::default()
    };
    let renderer = CloudRenderer::new(config)?;

    let mut camera = Camera::default();
    camera.set_aspect_ratio(FRAME_WIDTH as f32 / FRAME_HEIGHT as f32);
    camera.position = Vec3::new(0.0, -150.0, 1600.0);
    camera.look_at(Vec3::ZERO, Vec3::Y);

    log::info!("rendering {FRAME_WIDTH}x{FRAME_HEIGHT} frame");
    let frame = renderer.render(&camera, FRAME_WIDTH, FRAME_HEIGHT);

    save_composited(&frame, "cloud_frame.png")?;
    save_channels(renderer.weather_map(), "weather_map.png")?;
    save_red_channel(renderer.volume_high(), "volume_noise_high.png")?;
    save_red_channel(renderer.volume_low(), "volume_noise_low.png")?;
    log::info!("wrote cloud_frame.png, weather_map.png and the volume atlases");
    Ok(())
}

/// Cloud color over a flat sky background, by cloud opacity.
fn save_composited(frame: &Field2d, path: &str) -> Result<(), image::ImageError> {
    let mut img = RgbaImage::new(frame.width(), frame.height());
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let texel = frame.texel(x, y);
            let cloud = Vec3::new(texel.x, texel.y, texel.z);
            let color = SKY_COLOR + (cloud - SKY_COLOR) * texel.w;
            img.put_pixel(x, y, Rgba([to_u8(color.x), to_u8(color.y), to_u8(color.z), 255]));
        }
    }
    img.save(path)
}

fn save_channels(field: &Field2d, path: &str) -> Result<(), image::ImageError> {
    let mut img = RgbaImage::new(field.width(), field.height());
    for y in 0..field.height() {
        for x in 0..field.width() {
            let t = field.texel(x, y);
            img.put_pixel(x, y, Rgba([to_u8(t.x), to_u8(t.y), to_u8(t.z), to_u8(t.w)]));
        }
    }
    img.save(path)
}

fn save_red_channel(field: &Field2d, path: &str) -> Result<(), image::ImageError> {
    let mut img = RgbaImage::new(field.width(), field.height());
    for y in 0..field.height() {
        for x in 0..field.width() {
            let v = to_u8(field.texel(x, y).x);
            img.put_pixel(x, y, Rgba([v, v, v, 255]));
        }
    }
    img.save(path)
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}
