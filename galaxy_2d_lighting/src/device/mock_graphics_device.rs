/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every call in order so tests can assert on pass sequencing,
/// scissor rectangles, parameters and submitted geometry.

use glam::Vec4;
use rustc_hash::FxHashMap;
use winit::dpi::PhysicalSize;

use crate::device::{
    ClearFlags, CullMode, EffectDispatcher, EffectValue, PrimitiveSubmitter, PrimitiveTopology,
    Rect2D, RenderTarget, RenderTargetDesc, RenderTargetProvider, Technique, TextureDesc,
    TextureId, VertexData, Viewport,
};
use crate::error::{Error, Result};
use crate::engine_bail;

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateRenderTarget { id: TextureId, width: u32, height: u32 },
    DestroyRenderTarget(TextureId),
    BindRenderTargets(Vec<TextureId>),
    Clear { flags: ClearFlags, color: Vec4, stencil: u32 },
    SetScissor(Rect2D),
    SetCullMode(CullMode),
    CreateTexture { id: TextureId, width: u32, height: u32, bytes: usize },
    SetTechnique(Technique),
    ApplyPass(u32),
    SetParameter(String, EffectValue),
    Draw {
        technique: Option<Technique>,
        topology: PrimitiveTopology,
        vertex_count: usize,
        primitive_count: u32,
    },
    DrawIndexed {
        technique: Option<Technique>,
        topology: PrimitiveTopology,
        vertex_count: usize,
        indices: Vec<u32>,
        primitive_count: u32,
    },
}

pub struct MockGraphicsDevice {
    pub calls: Vec<DeviceCall>,
    pub viewport: Viewport,
    pub back_buffer: PhysicalSize<u32>,
    pub bound: Vec<RenderTarget>,
    pub live_targets: FxHashMap<TextureId, RenderTarget>,
    pub parameters: FxHashMap<String, EffectValue>,
    /// Pass count per technique; missing techniques are unimplemented
    pub pass_counts: FxHashMap<Technique, u32>,
    pub current_technique: Option<Technique>,
    /// Raw bytes of every vertex slice submitted, in draw order
    pub submitted_vertex_bytes: Vec<Vec<u8>>,
    /// Fail every draw call with a backend error
    pub fail_draws: bool,
    next_id: u64,
}

impl MockGraphicsDevice {
    pub fn new(width: u32, height: u32) -> Self {
        let pass_counts = Technique::ALL.iter().map(|t| (*t, 1)).collect();
        Self {
            calls: Vec::new(),
            viewport: Viewport { x: 0, y: 0, width, height },
            back_buffer: PhysicalSize::new(width, height),
            bound: Vec::new(),
            live_targets: FxHashMap::default(),
            parameters: FxHashMap::default(),
            pass_counts,
            current_technique: None,
            submitted_vertex_bytes: Vec::new(),
            fail_draws: false,
            next_id: 1,
        }
    }

    pub fn draws(&self) -> impl Iterator<Item = &DeviceCall> {
        self.calls.iter().filter(|c| {
            matches!(c, DeviceCall::Draw { .. } | DeviceCall::DrawIndexed { .. })
        })
    }

    pub fn draw_count_with(&self, technique: Technique) -> usize {
        self.draws()
            .filter(|c| match c {
                DeviceCall::Draw { technique: t, .. } | DeviceCall::DrawIndexed { technique: t, .. } => {
                    *t == Some(technique)
                }
                _ => false,
            })
            .count()
    }

    pub fn techniques(&self) -> Vec<Technique> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DeviceCall::SetTechnique(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn scissors(&self) -> Vec<Rect2D> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DeviceCall::SetScissor(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
        self.submitted_vertex_bytes.clear();
    }

    fn allocate_id(&mut self) -> TextureId {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl RenderTargetProvider for MockGraphicsDevice {
    fn viewport(&self) -> Viewport {
        match self.bound.first() {
            Some(target) => Viewport { x: 0, y: 0, width: target.width, height: target.height },
            None => self.viewport,
        }
    }

    fn back_buffer_size(&self) -> PhysicalSize<u32> {
        self.back_buffer
    }

    fn create_render_target(&mut self, desc: &RenderTargetDesc) -> Result<RenderTarget> {
        if desc.width == 0 || desc.height == 0 {
            return Err(Error::InvalidResource("zero-sized render target".to_string()));
        }
        let id = self.allocate_id();
        let target = RenderTarget { texture: id, width: desc.width, height: desc.height };
        self.live_targets.insert(id, target);
        self.calls.push(DeviceCall::CreateRenderTarget { id, width: desc.width, height: desc.height });
        Ok(target)
    }

    fn destroy_render_target(&mut self, target: RenderTarget) {
        self.live_targets.remove(&target.texture);
        self.calls.push(DeviceCall::DestroyRenderTarget(target.texture));
    }

    fn bind_render_targets(&mut self, targets: &[RenderTarget]) -> Result<Vec<RenderTarget>> {
        for target in targets {
            if !self.live_targets.contains_key(&target.texture) {
                engine_bail!("galaxy2d::mock", "binding released render target {:?}", target.texture);
            }
        }
        self.calls.push(DeviceCall::BindRenderTargets(targets.iter().map(|t| t.texture).collect()));
        Ok(std::mem::replace(&mut self.bound, targets.to_vec()))
    }

    fn clear(&mut self, flags: ClearFlags, color: Vec4, _depth: f32, stencil: u32) -> Result<()> {
        self.calls.push(DeviceCall::Clear { flags, color, stencil });
        Ok(())
    }

    fn set_scissor(&mut self, rect: Rect2D) {
        self.calls.push(DeviceCall::SetScissor(rect));
    }

    fn set_cull_mode(&mut self, mode: CullMode) {
        self.calls.push(DeviceCall::SetCullMode(mode));
    }

    fn create_texture(&mut self, desc: &TextureDesc, pixels: &[u8]) -> Result<TextureId> {
        if pixels.len() != desc.byte_len() {
            return Err(Error::InvalidResource(format!(
                "expected {} bytes, got {}", desc.byte_len(), pixels.len()
            )));
        }
        let id = self.allocate_id();
        self.calls.push(DeviceCall::CreateTexture {
            id,
            width: desc.width,
            height: desc.height,
            bytes: pixels.len(),
        });
        Ok(id)
    }
}

impl PrimitiveSubmitter for MockGraphicsDevice {
    fn draw_user_primitives(
        &mut self,
        topology: PrimitiveTopology,
        vertices: VertexData<'_>,
        primitive_count: u32,
    ) -> Result<()> {
        if self.fail_draws {
            engine_bail!("galaxy2d::mock", "draw rejected");
        }
        assert_eq!(topology.element_count(primitive_count) as usize, vertices.len());
        self.submitted_vertex_bytes.push(vertices.as_bytes().to_vec());
        self.calls.push(DeviceCall::Draw {
            technique: self.current_technique,
            topology,
            vertex_count: vertices.len(),
            primitive_count,
        });
        Ok(())
    }

    fn draw_user_indexed_primitives(
        &mut self,
        topology: PrimitiveTopology,
        vertices: VertexData<'_>,
        indices: &[u32],
        primitive_count: u32,
    ) -> Result<()> {
        if self.fail_draws {
            engine_bail!("galaxy2d::mock", "draw rejected");
        }
        assert_eq!(topology.element_count(primitive_count) as usize, indices.len());
        assert!(indices.iter().all(|i| (*i as usize) < vertices.len()));
        self.submitted_vertex_bytes.push(vertices.as_bytes().to_vec());
        self.calls.push(DeviceCall::DrawIndexed {
            technique: self.current_technique,
            topology,
            vertex_count: vertices.len(),
            indices: indices.to_vec(),
            primitive_count,
        });
        Ok(())
    }
}

impl EffectDispatcher for MockGraphicsDevice {
    fn set_technique(&mut self, technique: Technique) -> Result<()> {
        if !self.pass_counts.contains_key(&technique) {
            return Err(Error::UnimplementedTechnique(technique.name().to_string()));
        }
        self.current_technique = Some(technique);
        self.calls.push(DeviceCall::SetTechnique(technique));
        Ok(())
    }

    fn pass_count(&self) -> u32 {
        self.current_technique
            .and_then(|t| self.pass_counts.get(&t).copied())
            .unwrap_or(0)
    }

    fn apply_pass(&mut self, index: u32) -> Result<()> {
        if index >= self.pass_count() {
            engine_bail!("galaxy2d::mock", "pass {} out of range", index);
        }
        self.calls.push(DeviceCall::ApplyPass(index));
        Ok(())
    }

    fn set_parameter(&mut self, name: &str, value: EffectValue) -> Result<()> {
        self.parameters.insert(name.to_string(), value);
        self.calls.push(DeviceCall::SetParameter(name.to_string(), value));
        Ok(())
    }
}
