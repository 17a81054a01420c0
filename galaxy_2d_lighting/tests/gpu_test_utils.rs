#![allow(dead_code)]
//! Test utilities - Recording GraphicsDevice shared by the integration tests
//!
//! `RecordingDevice` implements the three device roles without a GPU. It
//! tracks live render targets and bindings, the current technique and every
//! parameter, and logs draws per technique so tests can assert on what a
//! frame submitted.

use galaxy_2d_lighting::galaxy2d::device::{
    ClearFlags, CullMode, EffectDispatcher, EffectValue, PrimitiveSubmitter, PrimitiveTopology,
    Rect2D, RenderTarget, RenderTargetDesc, RenderTargetProvider, Technique, TextureDesc,
    TextureId, VertexData, Viewport,
};
use galaxy_2d_lighting::galaxy2d::{Error, Result};
use galaxy_2d_lighting::glam::Vec4;
use rustc_hash::{FxHashMap, FxHashSet};
use winit::dpi::PhysicalSize;

/// One submitted draw
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub technique: Option<Technique>,
    pub topology: PrimitiveTopology,
    pub vertex_count: usize,
    pub primitive_count: u32,
    pub bound: Vec<TextureId>,
}

pub struct RecordingDevice {
    pub back_buffer: PhysicalSize<u32>,
    pub bound: Vec<RenderTarget>,
    pub live_targets: FxHashMap<TextureId, RenderTarget>,
    pub textures: FxHashSet<TextureId>,
    pub parameters: FxHashMap<String, EffectValue>,
    pub draws: Vec<RecordedDraw>,
    pub clears: Vec<(ClearFlags, u32)>,
    pub scissors: Vec<Rect2D>,
    pub cull_mode: Option<CullMode>,
    /// Techniques the loaded effect lacks
    pub missing_techniques: FxHashSet<Technique>,
    current_technique: Option<Technique>,
    next_id: u64,
}

impl RecordingDevice {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            back_buffer: PhysicalSize::new(width, height),
            bound: Vec::new(),
            live_targets: FxHashMap::default(),
            textures: FxHashSet::default(),
            parameters: FxHashMap::default(),
            draws: Vec::new(),
            clears: Vec::new(),
            scissors: Vec::new(),
            cull_mode: None,
            missing_techniques: FxHashSet::default(),
            current_technique: None,
            next_id: 1,
        }
    }

    pub fn draws_with(&self, technique: Technique) -> usize {
        self.draws.iter().filter(|d| d.technique == Some(technique)).count()
    }

    /// Forget recorded draws/clears/scissors, keeping resources
    pub fn reset_log(&mut self) {
        self.draws.clear();
        self.clears.clear();
        self.scissors.clear();
    }

    fn allocate_id(&mut self) -> TextureId {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        id
    }

    fn record(&mut self, topology: PrimitiveTopology, vertices: &VertexData<'_>, primitive_count: u32) {
        self.draws.push(RecordedDraw {
            technique: self.current_technique,
            topology,
            vertex_count: vertices.len(),
            primitive_count,
            bound: self.bound.iter().map(|t| t.texture).collect(),
        });
    }
}

impl RenderTargetProvider for RecordingDevice {
    fn viewport(&self) -> Viewport {
        match self.bound.first() {
            Some(target) => Viewport { x: 0, y: 0, width: target.width, height: target.height },
            None => Viewport { x: 0, y: 0, width: self.back_buffer.width, height: self.back_buffer.height },
        }
    }

    fn back_buffer_size(&self) -> PhysicalSize<u32> {
        self.back_buffer
    }

    fn create_render_target(&mut self, desc: &RenderTargetDesc) -> Result<RenderTarget> {
        if desc.width == 0 || desc.height == 0 {
            return Err(Error::InvalidResource("zero-sized render target".to_string()));
        }
        let target = RenderTarget { texture: self.allocate_id(), width: desc.width, height: desc.height };
        self.live_targets.insert(target.texture, target);
        Ok(target)
    }

    fn destroy_render_target(&mut self, target: RenderTarget) {
        self.live_targets.remove(&target.texture);
    }

    fn bind_render_targets(&mut self, targets: &[RenderTarget]) -> Result<Vec<RenderTarget>> {
        if let Some(released) = targets.iter().find(|t| !self.live_targets.contains_key(&t.texture)) {
            return Err(Error::InvalidResource(format!("render target {:?} was released", released.texture)));
        }
        Ok(std::mem::replace(&mut self.bound, targets.to_vec()))
    }

    fn clear(&mut self, flags: ClearFlags, _color: Vec4, _depth: f32, stencil: u32) -> Result<()> {
        self.clears.push((flags, stencil));
        Ok(())
    }

    fn set_scissor(&mut self, rect: Rect2D) {
        self.scissors.push(rect);
    }

    fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = Some(mode);
    }

    fn create_texture(&mut self, desc: &TextureDesc, pixels: &[u8]) -> Result<TextureId> {
        if pixels.len() != desc.byte_len() {
            return Err(Error::InvalidResource("texture data size mismatch".to_string()));
        }
        let id = self.allocate_id();
        self.textures.insert(id);
        Ok(id)
    }
}

impl PrimitiveSubmitter for RecordingDevice {
    fn draw_user_primitives(
        &mut self,
        topology: PrimitiveTopology,
        vertices: VertexData<'_>,
        primitive_count: u32,
    ) -> Result<()> {
        self.record(topology, &vertices, primitive_count);
        Ok(())
    }

    fn draw_user_indexed_primitives(
        &mut self,
        topology: PrimitiveTopology,
        vertices: VertexData<'_>,
        indices: &[u32],
        primitive_count: u32,
    ) -> Result<()> {
        if indices.iter().any(|i| *i as usize >= vertices.len()) {
            return Err(Error::BackendError("index out of range".to_string()));
        }
        self.record(topology, &vertices, primitive_count);
        Ok(())
    }
}

impl EffectDispatcher for RecordingDevice {
    fn set_technique(&mut self, technique: Technique) -> Result<()> {
        if self.missing_techniques.contains(&technique) {
            return Err(Error::UnimplementedTechnique(technique.name().to_string()));
        }
        self.current_technique = Some(technique);
        Ok(())
    }

    fn pass_count(&self) -> u32 {
        u32::from(self.current_technique.is_some())
    }

    fn apply_pass(&mut self, index: u32) -> Result<()> {
        if index >= self.pass_count() {
            return Err(Error::BackendError(format!("pass {} out of range", index)));
        }
        Ok(())
    }

    fn set_parameter(&mut self, name: &str, value: EffectValue) -> Result<()> {
        self.parameters.insert(name.to_string(), value);
        Ok(())
    }
}
