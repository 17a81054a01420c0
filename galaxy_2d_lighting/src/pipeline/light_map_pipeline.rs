/// Light-map pipeline - owns the scene's lights and hulls and renders the
/// light map once per frame.
///
/// Frame flow:
/// 1. The host forwards its view transform (`set_view_transform`); the
///    world-space view bounds are re-derived only when it changes.
/// 2. `prepare` draws every light intersecting the view bounds into the
///    primary target, then optionally blurs it through the scratch target.
/// 3. `present` composites the light map onto whatever target the host has
///    bound.
///
/// The pipeline holds no device reference: every GPU-touching call borrows
/// the host's `GraphicsDevice` for its own duration.

use bitflags::bitflags;
use glam::{Mat4, Vec2, Vec3, Vec4};
use slotmap::{new_key_type, SlotMap};
use winit::dpi::PhysicalSize;
use crate::device::{
    params, ClearFlags, Color, CullMode, DeviceEvent, EffectValue, GraphicsDevice, LightMapSize,
    Rect2D, RenderTarget, RenderTargetDesc, Technique, Viewport,
};
use crate::error::{Error, Result};
use crate::hull::{GeometryBuffer, ShadowHull};
use crate::light::Light;
use crate::math::BoundsRect;
use crate::render::{BlurStage, CompositeMode, RenderHelper};
use crate::{engine_debug, engine_error, engine_info, engine_warn};
use super::config::{sanitize_bluriness, LightMapConfig, ViewCulling};

const SOURCE: &str = "galaxy2d::LightMapPipeline";

// ===== SLOT MAP KEYS =====

new_key_type! {
    /// Stable handle of a light owned by the pipeline
    pub struct LightKey;

    /// Stable handle of a shadow hull owned by the pipeline
    pub struct HullKey;
}

/// Counters of the last `prepare` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Draw calls issued (shadow, emission, alpha clear, blur)
    pub draw_calls: u32,
    /// Lights intersecting the view bounds
    pub lights_drawn: u32,
    /// Lights skipped by view culling
    pub lights_culled: u32,
    /// Shadow triangles submitted over all lights
    pub shadow_triangles: u32,
}

bitflags! {
    /// Layers drawn by `draw_debug`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DebugOverlay: u32 {
        /// Visible hull geometry
        const HULLS = 1 << 0;
        /// Bounds of every light
        const LIGHT_BOUNDS = 1 << 1;
    }
}

pub struct LightMapPipeline {
    config: LightMapConfig,
    /// Lights, drawn in insertion order
    lights: SlotMap<LightKey, Box<dyn Light>>,
    light_order: Vec<LightKey>,
    /// Hulls, buffered in insertion order
    hulls: SlotMap<HullKey, ShadowHull>,
    hull_order: Vec<HullKey>,
    view_transform: Mat4,
    view_bounds: BoundsRect,
    /// Incremented each time the view bounds are recomputed
    view_revision: u64,
    /// Output surface the light map is sized against
    surface_size: PhysicalSize<u32>,
    primary: Option<RenderTarget>,
    scratch: Option<RenderTarget>,
    geometry: GeometryBuffer,
    last_frame_stats: FrameStats,
}

impl LightMapPipeline {
    pub fn new(mut config: LightMapConfig) -> Self {
        config.bluriness = sanitize_bluriness(config.bluriness);
        let view_bounds = compute_view_bounds(&Mat4::IDENTITY, config.view_culling);
        Self {
            config,
            lights: SlotMap::with_key(),
            light_order: Vec::new(),
            hulls: SlotMap::with_key(),
            hull_order: Vec::new(),
            view_transform: Mat4::IDENTITY,
            view_bounds,
            view_revision: 0,
            surface_size: PhysicalSize::new(0, 0),
            primary: None,
            scratch: None,
            geometry: GeometryBuffer::new(),
            last_frame_stats: FrameStats::default(),
        }
    }

    fn log_and_return_error(error: Error) -> Error {
        engine_error!(SOURCE, "{}", error);
        error
    }

    // ===== LIGHTS =====

    /// Add a light; it is drawn after every light added before it
    pub fn add_light<L: Light>(&mut self, light: L) -> LightKey {
        self.add_boxed_light(Box::new(light))
    }

    pub fn add_boxed_light(&mut self, light: Box<dyn Light>) -> LightKey {
        let key = self.lights.insert(light);
        self.light_order.push(key);
        key
    }

    /// Remove a light, returning it; `None` for a stale key
    pub fn remove_light(&mut self, key: LightKey) -> Option<Box<dyn Light>> {
        let light = self.lights.remove(key)?;
        self.light_order.retain(|k| *k != key);
        Some(light)
    }

    pub fn light(&self, key: LightKey) -> Option<&dyn Light> {
        self.lights.get(key).map(|light| light.as_ref())
    }

    /// Mutable access to a light of concrete type `T`
    ///
    /// `None` for a stale key or a light of another type.
    pub fn light_mut<T: Light>(&mut self, key: LightKey) -> Option<&mut T> {
        self.lights.get_mut(key)?.as_any_mut().downcast_mut::<T>()
    }

    /// Lights in draw order
    pub fn lights(&self) -> impl Iterator<Item = (LightKey, &dyn Light)> + '_ {
        self.light_order
            .iter()
            .filter_map(|key| self.lights.get(*key).map(|light| (*key, light.as_ref())))
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn clear_lights(&mut self) {
        self.lights.clear();
        self.light_order.clear();
    }

    // ===== HULLS =====

    pub fn add_hull(&mut self, hull: ShadowHull) -> HullKey {
        let key = self.hulls.insert(hull);
        self.hull_order.push(key);
        key
    }

    pub fn remove_hull(&mut self, key: HullKey) -> Option<ShadowHull> {
        let hull = self.hulls.remove(key)?;
        self.hull_order.retain(|k| *k != key);
        Some(hull)
    }

    pub fn hull(&self, key: HullKey) -> Option<&ShadowHull> {
        self.hulls.get(key)
    }

    pub fn hull_mut(&mut self, key: HullKey) -> Option<&mut ShadowHull> {
        self.hulls.get_mut(key)
    }

    /// Hulls in buffering order
    pub fn hulls(&self) -> impl Iterator<Item = (HullKey, &ShadowHull)> + '_ {
        self.hull_order
            .iter()
            .filter_map(|key| self.hulls.get(*key).map(|hull| (*key, hull)))
    }

    pub fn hull_count(&self) -> usize {
        self.hulls.len()
    }

    pub fn clear_hulls(&mut self) {
        self.hulls.clear();
        self.hull_order.clear();
    }

    fn ordered_hulls(&self) -> Vec<&ShadowHull> {
        self.hull_order.iter().filter_map(|key| self.hulls.get(*key)).collect()
    }

    // ===== CONFIGURATION =====

    pub fn config(&self) -> &LightMapConfig {
        &self.config
    }

    pub fn set_ambient_color(&mut self, color: Color) {
        self.config.ambient_color = color;
    }

    /// Negative values become 0 (blur disabled)
    pub fn set_bluriness(&mut self, bluriness: f32) {
        self.config.bluriness = sanitize_bluriness(bluriness);
    }

    pub fn set_cull_mode(&mut self, cull_mode: CullMode) {
        self.config.cull_mode = cull_mode;
    }

    pub fn set_sprite_batch_compatibility(&mut self, enabled: bool) {
        self.config.sprite_batch_compatibility = enabled;
    }

    pub fn set_composite_mode(&mut self, mode: CompositeMode) {
        self.config.composite_mode = mode;
    }

    /// Change the culling policy; re-derives the view bounds
    pub fn set_view_culling(&mut self, culling: ViewCulling) {
        if self.config.view_culling == culling {
            return;
        }
        self.config.view_culling = culling;
        self.update_view_bounds();
    }

    // ===== VIEW =====

    pub fn view_transform(&self) -> Mat4 {
        self.view_transform
    }

    /// Set the scene's world-view-projection transform
    ///
    /// Setting the current transform again is a no-op.
    pub fn set_view_transform(&mut self, transform: Mat4) {
        if self.view_transform == transform {
            return;
        }
        self.view_transform = transform;
        self.update_view_bounds();
    }

    /// World-space area covered by the view, used for light culling
    pub fn view_bounds(&self) -> BoundsRect {
        self.view_bounds
    }

    /// Number of view-bounds recomputations so far
    pub fn view_revision(&self) -> u64 {
        self.view_revision
    }

    fn update_view_bounds(&mut self) {
        self.view_bounds = compute_view_bounds(&self.view_transform, self.config.view_culling);
        self.view_revision += 1;
    }

    /// Transform used to draw the light map into a target of `viewport` size
    pub fn lightmap_matrix(&self, viewport: Viewport) -> Mat4 {
        if self.config.sprite_batch_compatibility {
            sprite_batch_matrix(viewport) * self.view_transform
        } else {
            self.view_transform
        }
    }

    // ===== RENDER TARGETS =====

    /// Primary light-map target, once content is loaded
    pub fn light_map(&self) -> Option<RenderTarget> {
        self.primary
    }

    pub fn is_loaded(&self) -> bool {
        self.primary.is_some()
    }

    pub fn light_map_size(&self) -> LightMapSize {
        self.config.light_map_size
    }

    /// Size the light map against the current viewport and create its targets
    pub fn load_content(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        self.surface_size = device.viewport().size();
        self.release_render_targets(device);
        self.create_render_targets(device)
    }

    /// Release the render targets; safe to call repeatedly
    pub fn unload_content(&mut self, device: &mut dyn GraphicsDevice) {
        self.release_render_targets(device);
    }

    /// Change the light-map resolution, recreating loaded targets
    pub fn set_light_map_size(&mut self, device: &mut dyn GraphicsDevice, size: LightMapSize) -> Result<()> {
        if self.config.light_map_size == size {
            return Ok(());
        }
        self.config.light_map_size = size;
        self.recreate_render_targets(device)
    }

    /// React to a device reset or back-buffer resize
    pub fn handle_device_event(&mut self, device: &mut dyn GraphicsDevice, event: DeviceEvent) -> Result<()> {
        match event {
            DeviceEvent::Reset => {
                engine_info!(SOURCE, "Device reset, recreating light map");
            }
            DeviceEvent::Resized(size) => {
                engine_debug!(SOURCE, "Surface resized to {}x{}", size.width, size.height);
                self.surface_size = size;
            }
        }
        self.recreate_render_targets(device)
    }

    fn recreate_render_targets(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        if !self.is_loaded() {
            return Ok(());
        }
        self.release_render_targets(device);
        self.create_render_targets(device)
    }

    fn create_render_targets(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        let size = self.config.light_map_size.target_size(self.surface_size);
        let desc = RenderTargetDesc::light_map(size.width, size.height);

        let primary = device.create_render_target(&desc).map_err(Self::log_and_return_error)?;
        let scratch = match device.create_render_target(&desc) {
            Ok(target) => target,
            Err(error) => {
                device.destroy_render_target(primary);
                return Err(Self::log_and_return_error(error));
            }
        };

        self.primary = Some(primary);
        self.scratch = Some(scratch);
        engine_debug!(SOURCE, "Created {}x{} light map targets ({:?})",
            size.width, size.height, self.config.light_map_size);
        Ok(())
    }

    fn release_render_targets(&mut self, device: &mut dyn GraphicsDevice) {
        for target in [self.primary.take(), self.scratch.take()].into_iter().flatten() {
            device.destroy_render_target(target);
        }
    }

    fn loaded_targets(&self) -> Result<(RenderTarget, RenderTarget)> {
        match (self.primary, self.scratch) {
            (Some(primary), Some(scratch)) => Ok((primary, scratch)),
            _ => Err(Self::log_and_return_error(Error::InvalidResource(
                "light map render targets are not loaded".to_string(),
            ))),
        }
    }

    // ===== FRAME =====

    /// Render the light map
    ///
    /// The host's render-target bindings are restored before returning,
    /// including when a light fails to draw.
    pub fn prepare(&mut self, device: &mut dyn GraphicsDevice) -> Result<FrameStats> {
        let (primary, scratch) = self.loaded_targets()?;

        let matrix = self.lightmap_matrix(device.viewport());
        device.set_parameter(params::MATRIX, EffectValue::Matrix(matrix))
            .map_err(Self::log_and_return_error)?;

        let previous = device.bind_render_targets(&[primary]).map_err(Self::log_and_return_error)?;
        let drawn = self.draw_lights(device, primary, scratch, &matrix);
        let restored = device.bind_render_targets(&previous);

        let stats = drawn.map_err(Self::log_and_return_error)?;
        restored.map_err(Self::log_and_return_error)?;

        self.last_frame_stats = stats;
        Ok(stats)
    }

    fn draw_lights(
        &mut self,
        device: &mut dyn GraphicsDevice,
        primary: RenderTarget,
        scratch: RenderTarget,
        matrix: &Mat4,
    ) -> Result<FrameStats> {
        device.clear(ClearFlags::TARGET | ClearFlags::STENCIL, self.config.ambient_color.to_vec4(), 0.0, 1)?;
        device.set_cull_mode(self.config.cull_mode);

        let target_size = Vec2::new(primary.width as f32, primary.height as f32);
        let hulls: Vec<&ShadowHull> = self.hull_order.iter().filter_map(|key| self.hulls.get(*key)).collect();
        let mut stats = FrameStats::default();
        let mut helper = RenderHelper::new(device, &mut self.geometry);

        for key in &self.light_order {
            let Some(light) = self.lights.get(*key) else {
                continue;
            };
            let bounds = light.bounds();
            if !bounds.intersects(&self.view_bounds) {
                stats.lights_culled += 1;
                continue;
            }

            helper.device().clear(ClearFlags::STENCIL, Vec4::ZERO, 0.0, 0)?;
            helper.device().set_scissor(scissor_rect_for_bounds(&bounds, matrix, target_size));

            helper.buffer_clear();
            light.draw(&mut helper, &hulls)?;

            stats.lights_drawn += 1;
            stats.shadow_triangles += helper.buffer().triangle_count() as u32;
        }

        if self.config.bluriness > 0.0 {
            BlurStage::new(self.config.bluriness, self.config.light_map_size)
                .run(&mut helper, primary, scratch)?;
        }

        stats.draw_calls = helper.draw_calls();
        Ok(stats)
    }

    /// Counters of the last successful `prepare`
    pub fn last_frame_stats(&self) -> FrameStats {
        self.last_frame_stats
    }

    /// Composite the light map onto the currently bound target
    pub fn present(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        let (primary, _) = self.loaded_targets()?;
        let mut helper = RenderHelper::new(device, &mut self.geometry);
        helper
            .draw_texture_to_target(primary.texture, self.config.light_map_size, self.config.composite_mode)
            .map_err(Self::log_and_return_error)
    }

    /// Draw hull geometry and/or light bounds onto the currently bound target
    pub fn draw_debug(&mut self, device: &mut dyn GraphicsDevice, overlay: DebugOverlay) -> Result<()> {
        let matrix = self.lightmap_matrix(device.viewport());
        device.set_parameter(params::MATRIX, EffectValue::Matrix(matrix))?;

        let mut helper = RenderHelper::new(device, &mut self.geometry);
        helper.buffer_clear();

        if overlay.contains(DebugOverlay::HULLS) {
            for key in &self.hull_order {
                if let Some(hull) = self.hulls.get(*key).filter(|hull| hull.visible) {
                    helper.buffer_add_shadow_hull(hull);
                }
            }
        }
        if overlay.contains(DebugOverlay::LIGHT_BOUNDS) {
            for key in &self.light_order {
                if let Some(light) = self.lights.get(*key) {
                    helper.buffer_add_bounds_outline(&light.bounds());
                }
            }
        }

        helper.for_each_pass(Technique::DebugOutline, |h| h.buffer_draw())
    }

    /// Light reaching `point` on the CPU: ambient plus every light in view
    ///
    /// Mirrors `prepare` without the blur; each channel is saturated to [0, 1].
    pub fn sample(&self, point: Vec2) -> Vec3 {
        let hulls = self.ordered_hulls();
        let lit = self
            .lights()
            .filter(|(_, light)| light.bounds().intersects(&self.view_bounds))
            .fold(Vec3::ZERO, |sum, (_, light)| sum + light.sample(point, &hulls));

        (self.config.ambient_color.to_vec3() + lit).min(Vec3::ONE)
    }
}

/// World-space bounds of the NDC square under `transform`
fn compute_view_bounds(transform: &Mat4, culling: ViewCulling) -> BoundsRect {
    if culling == ViewCulling::Disabled {
        return BoundsRect::MAX_EXTENT;
    }

    let determinant = transform.determinant();
    if determinant == 0.0 || !determinant.is_finite() {
        engine_warn!(SOURCE, "View transform is not invertible, light culling disabled");
        return BoundsRect::MAX_EXTENT;
    }

    let inverse = transform.inverse();
    BoundsRect::from_points(
        [Vec2::new(1.0, 1.0), Vec2::new(1.0, -1.0), Vec2::new(-1.0, -1.0), Vec2::new(-1.0, 1.0)]
            .map(|corner| inverse.transform_point3(corner.extend(0.0)).truncate()),
    )
}

/// Pixel projection used by sprite batches (y down, origin top-left)
fn sprite_batch_matrix(viewport: Viewport) -> Mat4 {
    let x_scale = if viewport.width > 0 { 1.0 / viewport.width as f32 } else { 0.0 };
    let y_scale = if viewport.height > 0 { -1.0 / viewport.height as f32 } else { 0.0 };

    Mat4::from_cols(
        Vec4::new(x_scale * 2.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, y_scale * 2.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(-1.0 - x_scale, 1.0 - y_scale, 0.0, 1.0),
    )
}

/// Target-pixel rectangle covering `bounds` projected through `matrix`
pub(crate) fn scissor_rect_for_bounds(bounds: &BoundsRect, matrix: &Mat4, target_size: Vec2) -> Rect2D {
    let to_pixel = |v: Vec2| {
        let ndc = matrix.transform_point3(v.extend(0.0));
        Vec2::new((1.0 + ndc.x) * target_size.x / 2.0, (1.0 - ndc.y) * target_size.y / 2.0)
    };

    let a = to_pixel(bounds.min);
    let b = to_pixel(bounds.max);
    let min = a.min(b).clamp(Vec2::ZERO, target_size);
    let max = a.max(b).clamp(Vec2::ZERO, target_size);

    Rect2D {
        x: min.x as i32,
        y: min.y as i32,
        width: (max.x - min.x) as u32,
        height: (max.y - min.y) as u32,
    }
}

#[cfg(test)]
#[path = "light_map_pipeline_tests.rs"]
mod tests;
