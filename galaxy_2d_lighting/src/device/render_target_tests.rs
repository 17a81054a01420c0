use winit::dpi::PhysicalSize;
use super::*;

#[test]
fn test_texture_byte_len() {
    let desc = TextureDesc { width: 64, height: 32, format: TextureFormat::R8G8B8A8_UNORM };
    assert_eq!(desc.byte_len(), 64 * 32 * 4);
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_texture_byte_len_beyond_u32() {
    // 70000² texels overflow u32 once multiplied out
    let desc = TextureDesc { width: 70_000, height: 70_000, format: TextureFormat::R8G8B8A8_UNORM };
    assert_eq!(desc.byte_len(), 19_600_000_000);
}

#[test]
fn test_light_map_target_size() {
    let surface = PhysicalSize::new(800, 600);
    assert_eq!(LightMapSize::Full.target_size(surface), PhysicalSize::new(800, 600));
    assert_eq!(LightMapSize::Fourth.target_size(surface), PhysicalSize::new(200, 150));
    assert_eq!(LightMapSize::Eighth.target_size(surface), PhysicalSize::new(100, 75));
}

#[test]
fn test_light_map_target_size_never_zero() {
    let surface = PhysicalSize::new(5, 0);
    assert_eq!(LightMapSize::Eighth.target_size(surface), PhysicalSize::new(1, 1));
}

#[test]
fn test_light_map_desc_carries_stencil() {
    let desc = RenderTargetDesc::light_map(320, 240);
    assert_eq!(desc.format, TextureFormat::R8G8B8A8_UNORM);
    assert_eq!(desc.depth_format, DepthFormat::Depth24Stencil8);
}

#[test]
fn test_clear_flags_are_distinct() {
    let both = ClearFlags::TARGET | ClearFlags::STENCIL;
    assert!(both.contains(ClearFlags::STENCIL));
    assert!(!ClearFlags::TARGET.intersects(ClearFlags::STENCIL));
}
