//! An in-memory [`RenderContext`] for unit tests.
//!
//! Tracks every object it hands out and panics on double deletes or on use
//! of unknown names, so leaks and double frees show up as test failures.
//! A shader "compiles" when its source contains a `main` function, and a
//! uniform exists when a linked stage declares it.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use crate::context::{
    GlHandle, RenderContext, ShaderStage, TextureImage, UniformLocation, UniformValue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Shader,
    Program,
    VertexArray,
    Buffer,
    Texture,
}

/// A draw call as issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    Arrays { mode: u32, first: i32, count: i32 },
    Elements { mode: u32, count: i32, element_type: u32 },
}

/// Geometry of an uploaded texture level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureUpload {
    pub width: i32,
    pub height: i32,
    pub format: u32,
    pub bytes: usize,
}

#[derive(Default)]
struct State {
    next_name: u32,
    live: HashMap<GlHandle, ObjectKind>,
    created: Vec<(ObjectKind, GlHandle)>,
    deleted: HashSet<GlHandle>,
    sources: HashMap<GlHandle, String>,
    compiled: HashSet<GlHandle>,
    attached: HashMap<GlHandle, Vec<GlHandle>>,
    linked: HashMap<GlHandle, Vec<String>>,
    uniforms: HashMap<(GlHandle, String), UniformLocation>,
    current_program: Option<GlHandle>,
    bound_vertex_array: Option<GlHandle>,
    bound_texture: Option<GlHandle>,
    buffer_uploads: Vec<(u32, usize)>,
    attributes: Vec<(u32, i32, i32, i32)>,
    enabled_attributes: Vec<u32>,
    texture_params: Vec<(u32, i32)>,
    texture_uploads: Vec<TextureUpload>,
    mipmaps: usize,
    uniform_writes: Vec<(Option<UniformLocation>, UniformValue)>,
    viewport: Option<[i32; 4]>,
    clear_color: Option<[f32; 4]>,
    clears: usize,
    draws: Vec<DrawCall>,
    presents: usize,
    surface_size: Option<(u32, u32)>,
}

/// See the module documentation.
#[derive(Default)]
pub struct RecordingContext {
    state: RefCell<State>,
    fail_link: Cell<bool>,
    fail_create: Cell<Option<ObjectKind>>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent link fail.
    pub fn fail_link(&self, fail: bool) {
        self.fail_link.set(fail);
    }

    /// Make creation of `kind` objects fail.
    pub fn fail_create(&self, kind: Option<ObjectKind>) {
        self.fail_create.set(kind);
    }

    pub fn live_objects(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub fn live_count(&self, kind: ObjectKind) -> usize {
        self.state
            .borrow()
            .live
            .values()
            .filter(|&&k| k == kind)
            .count()
    }

    pub fn created_count(&self, kind: ObjectKind) -> usize {
        self.state
            .borrow()
            .created
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn was_deleted(&self, name: GlHandle) -> bool {
        self.state.borrow().deleted.contains(&name)
    }

    pub fn current_program(&self) -> Option<GlHandle> {
        self.state.borrow().current_program
    }

    pub fn bound_vertex_array(&self) -> Option<GlHandle> {
        self.state.borrow().bound_vertex_array
    }

    pub fn bound_texture(&self) -> Option<GlHandle> {
        self.state.borrow().bound_texture
    }

    pub fn buffer_uploads(&self) -> Vec<(u32, usize)> {
        self.state.borrow().buffer_uploads.clone()
    }

    /// `(index, components, stride, offset)` per `vertex_attrib_pointer_f32`.
    pub fn attributes(&self) -> Vec<(u32, i32, i32, i32)> {
        self.state.borrow().attributes.clone()
    }

    pub fn enabled_attributes(&self) -> Vec<u32> {
        self.state.borrow().enabled_attributes.clone()
    }

    pub fn texture_params(&self) -> Vec<(u32, i32)> {
        self.state.borrow().texture_params.clone()
    }

    pub fn texture_uploads(&self) -> Vec<TextureUpload> {
        self.state.borrow().texture_uploads.clone()
    }

    pub fn mipmaps(&self) -> usize {
        self.state.borrow().mipmaps
    }

    pub fn uniform_writes(&self) -> Vec<(Option<UniformLocation>, UniformValue)> {
        self.state.borrow().uniform_writes.clone()
    }

    pub fn viewport(&self) -> Option<[i32; 4]> {
        self.state.borrow().viewport
    }

    pub fn clear_color_value(&self) -> Option<[f32; 4]> {
        self.state.borrow().clear_color
    }

    pub fn clears(&self) -> usize {
        self.state.borrow().clears
    }

    pub fn draws(&self) -> Vec<DrawCall> {
        self.state.borrow().draws.clone()
    }

    pub fn presents(&self) -> usize {
        self.state.borrow().presents
    }

    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.state.borrow().surface_size
    }

    fn create(&self, kind: ObjectKind) -> Result<GlHandle, String> {
        if self.fail_create.get() == Some(kind) {
            return Err(format!("out of {kind:?} names"));
        }
        let mut state = self.state.borrow_mut();
        state.next_name += 1;
        let name = GlHandle::new(state.next_name).expect("names start at 1");
        state.live.insert(name, kind);
        state.created.push((kind, name));
        Ok(name)
    }

    fn delete(&self, name: GlHandle, kind: ObjectKind) {
        let mut state = self.state.borrow_mut();
        match state.live.remove(&name) {
            Some(k) if k == kind => {}
            Some(k) => panic!("deleted {name} as {kind:?} but it is a {k:?}"),
            None => panic!("{kind:?} {name} deleted twice or never created"),
        }
        state.deleted.insert(name);
    }

    fn assert_live(&self, name: GlHandle, kind: ObjectKind) {
        let state = self.state.borrow();
        assert_eq!(
            state.live.get(&name),
            Some(&kind),
            "{kind:?} {name} is not alive"
        );
    }
}

fn declares_uniform(source: &str, name: &str) -> bool {
    source.lines().any(|line| {
        let line = line.trim();
        line.starts_with("uniform ")
            && line
                .trim_end_matches(';')
                .split_whitespace()
                .last()
                .is_some_and(|declared| declared == name)
    })
}

impl RenderContext for RecordingContext {
    fn create_shader(&self, _stage: ShaderStage) -> Result<GlHandle, String> {
        self.create(ObjectKind::Shader)
    }

    fn shader_source(&self, shader: GlHandle, source: &str) {
        self.assert_live(shader, ObjectKind::Shader);
        self.state
            .borrow_mut()
            .sources
            .insert(shader, source.to_string());
    }

    fn compile_shader(&self, shader: GlHandle) {
        self.assert_live(shader, ObjectKind::Shader);
        let mut state = self.state.borrow_mut();
        if state
            .sources
            .get(&shader)
            .is_some_and(|s| s.contains("void main()"))
        {
            state.compiled.insert(shader);
        }
    }

    fn shader_compile_status(&self, shader: GlHandle) -> bool {
        self.state.borrow().compiled.contains(&shader)
    }

    fn shader_info_log(&self, shader: GlHandle) -> String {
        format!("0:1(1): error: shader {shader} has no main function")
    }

    fn delete_shader(&self, shader: GlHandle) {
        self.delete(shader, ObjectKind::Shader);
    }

    fn create_program(&self) -> Result<GlHandle, String> {
        self.create(ObjectKind::Program)
    }

    fn attach_shader(&self, program: GlHandle, shader: GlHandle) {
        self.assert_live(program, ObjectKind::Program);
        self.assert_live(shader, ObjectKind::Shader);
        self.state
            .borrow_mut()
            .attached
            .entry(program)
            .or_default()
            .push(shader);
    }

    fn detach_shader(&self, program: GlHandle, shader: GlHandle) {
        let mut state = self.state.borrow_mut();
        let attached = state.attached.entry(program).or_default();
        assert!(attached.contains(&shader), "{shader} not attached to {program}");
        attached.retain(|&s| s != shader);
    }

    fn link_program(&self, program: GlHandle) {
        self.assert_live(program, ObjectKind::Program);
        if self.fail_link.get() {
            return;
        }
        let mut state = self.state.borrow_mut();
        let stages = state.attached.get(&program).cloned().unwrap_or_default();
        if stages.len() != 2 || !stages.iter().all(|s| state.compiled.contains(s)) {
            return;
        }
        let sources = stages
            .iter()
            .filter_map(|s| state.sources.get(s).cloned())
            .collect();
        state.linked.insert(program, sources);
    }

    fn program_link_status(&self, program: GlHandle) -> bool {
        self.state.borrow().linked.contains_key(&program)
    }

    fn program_info_log(&self, program: GlHandle) -> String {
        format!("error: program {program} failed to link")
    }

    fn delete_program(&self, program: GlHandle) {
        self.delete(program, ObjectKind::Program);
        let mut state = self.state.borrow_mut();
        state.linked.remove(&program);
        if state.current_program == Some(program) {
            state.current_program = None;
        }
    }

    fn use_program(&self, program: Option<GlHandle>) {
        if let Some(program) = program {
            self.assert_live(program, ObjectKind::Program);
        }
        self.state.borrow_mut().current_program = program;
    }

    fn uniform_location(&self, program: GlHandle, name: &str) -> Option<UniformLocation> {
        let mut state = self.state.borrow_mut();
        let declared = state
            .linked
            .get(&program)?
            .iter()
            .any(|source| declares_uniform(source, name));
        if !declared {
            return None;
        }
        let next = u32::try_from(state.uniforms.len()).expect("few uniforms");
        Some(
            *state
                .uniforms
                .entry((program, name.to_string()))
                .or_insert(UniformLocation(next)),
        )
    }

    fn set_uniform(&self, location: Option<&UniformLocation>, value: UniformValue) {
        self.state
            .borrow_mut()
            .uniform_writes
            .push((location.copied(), value));
    }

    fn create_vertex_array(&self) -> Result<GlHandle, String> {
        self.create(ObjectKind::VertexArray)
    }

    fn bind_vertex_array(&self, vertex_array: Option<GlHandle>) {
        if let Some(vertex_array) = vertex_array {
            self.assert_live(vertex_array, ObjectKind::VertexArray);
        }
        self.state.borrow_mut().bound_vertex_array = vertex_array;
    }

    fn delete_vertex_array(&self, vertex_array: GlHandle) {
        self.delete(vertex_array, ObjectKind::VertexArray);
    }

    fn create_buffer(&self) -> Result<GlHandle, String> {
        self.create(ObjectKind::Buffer)
    }

    fn bind_buffer(&self, _target: u32, buffer: Option<GlHandle>) {
        if let Some(buffer) = buffer {
            self.assert_live(buffer, ObjectKind::Buffer);
        }
    }

    fn buffer_data(&self, target: u32, data: &[u8], _usage: u32) {
        self.state
            .borrow_mut()
            .buffer_uploads
            .push((target, data.len()));
    }

    fn delete_buffer(&self, buffer: GlHandle) {
        self.delete(buffer, ObjectKind::Buffer);
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32) {
        self.state
            .borrow_mut()
            .attributes
            .push((index, size, stride, offset));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.state.borrow_mut().enabled_attributes.push(index);
    }

    fn create_texture(&self) -> Result<GlHandle, String> {
        self.create(ObjectKind::Texture)
    }

    fn active_texture(&self, _unit: u32) {}

    fn bind_texture(&self, texture: Option<GlHandle>) {
        if let Some(texture) = texture {
            self.assert_live(texture, ObjectKind::Texture);
        }
        self.state.borrow_mut().bound_texture = texture;
    }

    fn tex_parameter_i32(&self, pname: u32, value: i32) {
        self.state.borrow_mut().texture_params.push((pname, value));
    }

    fn pixel_unpack_alignment(&self, _alignment: i32) {}

    fn tex_image_2d(&self, image: TextureImage<'_>) {
        self.state.borrow_mut().texture_uploads.push(TextureUpload {
            width: image.width,
            height: image.height,
            format: image.format,
            bytes: image.pixels.len(),
        });
    }

    fn generate_mipmap(&self) {
        self.state.borrow_mut().mipmaps += 1;
    }

    fn delete_texture(&self, texture: GlHandle) {
        self.delete(texture, ObjectKind::Texture);
        let mut state = self.state.borrow_mut();
        if state.bound_texture == Some(texture) {
            state.bound_texture = None;
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.state.borrow_mut().viewport = Some([x, y, width, height]);
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.state.borrow_mut().clear_color = Some([red, green, blue, alpha]);
    }

    fn clear(&self, _mask: u32) {
        self.state.borrow_mut().clears += 1;
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.state
            .borrow_mut()
            .draws
            .push(DrawCall::Arrays { mode, first, count });
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, _offset: i32) {
        self.state.borrow_mut().draws.push(DrawCall::Elements {
            mode,
            count,
            element_type,
        });
    }

    fn parameter_string(&self, _pname: u32) -> String {
        "recording".to_string()
    }

    fn present(&self) {
        self.state.borrow_mut().presents += 1;
    }

    fn resize_surface(&self, width: u32, height: u32) {
        self.state.borrow_mut().surface_size = Some((width, height));
    }
}
