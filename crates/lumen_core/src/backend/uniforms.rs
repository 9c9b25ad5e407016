//! Per-program uniform cache
//!
//! Remembers the last value uploaded to every declared uniform slot and
//! skips uploads that are bit-for-bit identical. Equality is deliberately
//! exact rather than approximate: the cache mirrors what the driver holds,
//! and only an exactly equal value makes the upload redundant.

use std::collections::HashMap;

use crate::backend::{
    GraphicsBackend, ProgramHandle, StateCache, TextureHandle, TextureKind, UniformLocation,
};
use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Kind tag of a uniform slot, fixed at declaration time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    /// Single `f32`
    Float,
    /// Single `i32`
    Int,
    /// 3-component float vector
    Vec3,
    /// 4-component float vector
    Vec4,
    /// 4x4 float matrix
    Mat4,
    /// Flat `f32` array
    FloatArray,
    /// Texture sampler (uploads a texture-unit index)
    Sampler,
}

/// A uniform value as uploaded to the backend
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// Single `f32`
    Float(f32),
    /// Single `i32`
    Int(i32),
    /// 3-component float vector
    Vec3(Vec3),
    /// 4-component float vector
    Vec4(Vec4),
    /// 4x4 float matrix
    Mat4(Mat4),
    /// Flat `f32` array
    FloatArray(Vec<f32>),
    /// Texture-unit index for a sampler uniform
    Sampler(u32),
}

impl UniformValue {
    /// The kind tag matching this value
    #[must_use]
    pub fn kind(&self) -> UniformKind {
        match self {
            Self::Float(_) => UniformKind::Float,
            Self::Int(_) => UniformKind::Int,
            Self::Vec3(_) => UniformKind::Vec3,
            Self::Vec4(_) => UniformKind::Vec4,
            Self::Mat4(_) => UniformKind::Mat4,
            Self::FloatArray(_) => UniformKind::FloatArray,
            Self::Sampler(_) => UniformKind::Sampler,
        }
    }

    /// Bit-for-bit equality between two values
    ///
    /// Floats are compared by their raw bit patterns (so NaN payloads are
    /// preserved and `-0.0 != 0.0`); aggregates compare element-wise as raw
    /// byte slices.
    #[must_use]
    pub fn bits_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Vec3(a), Self::Vec3(b)) => float_slice_bits_eq(a.as_slice(), b.as_slice()),
            (Self::Vec4(a), Self::Vec4(b)) => float_slice_bits_eq(a.as_slice(), b.as_slice()),
            (Self::Mat4(a), Self::Mat4(b)) => float_slice_bits_eq(a.as_slice(), b.as_slice()),
            (Self::FloatArray(a), Self::FloatArray(b)) => float_slice_bits_eq(a, b),
            (Self::Sampler(a), Self::Sampler(b)) => a == b,
            _ => false,
        }
    }
}

fn float_slice_bits_eq(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && bytemuck::cast_slice::<f32, u8>(a) == bytemuck::cast_slice::<f32, u8>(b)
}

/// One declared uniform: its resolved location, kind, and last upload
#[derive(Debug, Clone)]
pub struct UniformSlot {
    location: UniformLocation,
    kind: UniformKind,
    last: Option<UniformValue>,
}

impl UniformSlot {
    /// The slot's resolved backend location
    #[must_use]
    pub fn location(&self) -> UniformLocation {
        self.location
    }

    /// The slot's kind tag
    #[must_use]
    pub fn kind(&self) -> UniformKind {
        self.kind
    }
}

/// Uniform cache for a single program.
///
/// Slots are created by [`declare`](Self::declare) and live as long as the
/// program; the table is dropped when the program is destroyed. Unresolved
/// or undeclared names are configuration errors: logged (or silently
/// skipped) and never fatal, since material definitions may legitimately
/// name uniforms the shader compiler optimized out.
#[derive(Debug)]
pub struct UniformTable {
    program: ProgramHandle,
    slots: HashMap<String, UniformSlot>,
}

impl UniformTable {
    /// Create an empty table for `program`
    #[must_use]
    pub fn new(program: ProgramHandle) -> Self {
        Self {
            program,
            slots: HashMap::new(),
        }
    }

    /// The program this table belongs to
    #[must_use]
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    /// Declare a uniform slot, resolving its location in the program
    ///
    /// A name the backend cannot resolve is logged and skipped; later
    /// `set_*` calls for it become no-ops.
    pub fn declare<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &B,
        name: &str,
        kind: UniformKind,
    ) {
        match backend.uniform_location(self.program, name) {
            Some(location) => {
                self.slots.insert(
                    name.to_owned(),
                    UniformSlot {
                        location,
                        kind,
                        last: None,
                    },
                );
            }
            None => {
                log::warn!("uniform '{name}' not found in program {:?}, skipping", self.program);
            }
        }
    }

    /// Whether `name` was declared and resolved
    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Upload `value` to the named uniform unless it is bit-identical to
    /// the last uploaded value
    ///
    /// Undeclared names are no-ops. A value whose kind does not match the
    /// declared kind is a configuration error: logged and ignored. Sampler
    /// slots must go through [`set_sampler`](Self::set_sampler) so the
    /// texture binding is routed through the state cache.
    pub fn set<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        name: &str,
        value: UniformValue,
    ) {
        let Some(slot) = self.slots.get_mut(name) else {
            return;
        };
        if slot.kind == UniformKind::Sampler {
            log::warn!(
                "uniform '{name}' is a sampler; use set_sampler so the texture \
                 binding routes through the state cache"
            );
            return;
        }
        if value.kind() != slot.kind {
            log::warn!(
                "uniform '{name}' declared as {:?} but set with {:?}, ignoring",
                slot.kind,
                value.kind()
            );
            return;
        }
        if slot.last.as_ref().is_some_and(|last| last.bits_eq(&value)) {
            return;
        }
        backend.upload_uniform(slot.location, &value);
        slot.last = Some(value);
    }

    /// Bind a texture for a sampler uniform and upload its unit index
    ///
    /// The texture is always routed through the state cache (which elides a
    /// redundant bind on its own); the integer unit-index upload is skipped
    /// when the unit has not changed since the last call.
    pub fn set_sampler<B: GraphicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        states: &mut StateCache,
        name: &str,
        kind: TextureKind,
        texture: TextureHandle,
        unit: u32,
    ) {
        let Some(slot) = self.slots.get_mut(name) else {
            return;
        };
        if slot.kind != UniformKind::Sampler {
            log::warn!("uniform '{name}' declared as {:?}, not a sampler, ignoring", slot.kind);
            return;
        }

        states.bind_texture(backend, kind, texture, unit);

        let value = UniformValue::Sampler(unit);
        if slot.last.as_ref().is_some_and(|last| last.bits_eq(&value)) {
            return;
        }
        backend.upload_uniform(slot.location, &value);
        slot.last = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::RecordingBackend;

    fn table_with(backend: &mut RecordingBackend, names: &[(&str, UniformKind)]) -> UniformTable {
        let program = backend.make_program();
        let mut table = UniformTable::new(program);
        for (name, kind) in names {
            table.declare(backend, name, *kind);
        }
        table
    }

    #[test]
    fn test_unchanged_matrix_uploads_once() {
        let mut backend = RecordingBackend::default();
        let mut table = table_with(&mut backend, &[("u_model", UniformKind::Mat4)]);

        let matrix = Mat4::identity();
        table.set(&mut backend, "u_model", UniformValue::Mat4(matrix));
        table.set(&mut backend, "u_model", UniformValue::Mat4(matrix));
        table.set(&mut backend, "u_model", UniformValue::Mat4(matrix));

        assert_eq!(backend.counts.upload_uniform, 1);
    }

    #[test]
    fn test_single_component_change_triggers_upload() {
        let mut backend = RecordingBackend::default();
        let mut table = table_with(&mut backend, &[("u_model", UniformKind::Mat4)]);

        let mut matrix = Mat4::identity();
        table.set(&mut backend, "u_model", UniformValue::Mat4(matrix));
        matrix[(2, 3)] = 0.001;
        table.set(&mut backend, "u_model", UniformValue::Mat4(matrix));

        assert_eq!(backend.counts.upload_uniform, 2);
    }

    #[test]
    fn test_undeclared_name_is_noop() {
        let mut backend = RecordingBackend::default();
        let mut table = table_with(&mut backend, &[("u_color", UniformKind::Vec4)]);

        table.set(&mut backend, "u_missing", UniformValue::Float(1.0));

        assert_eq!(backend.counts.upload_uniform, 0);
    }

    #[test]
    fn test_unresolved_declaration_is_skipped() {
        let mut backend = RecordingBackend::default();
        backend.missing_uniforms.insert("u_optimized_out".to_owned());
        let mut table = table_with(&mut backend, &[]);

        table.declare(&backend, "u_optimized_out", UniformKind::Float);
        assert!(!table.is_declared("u_optimized_out"));

        table.set(&mut backend, "u_optimized_out", UniformValue::Float(1.0));
        assert_eq!(backend.counts.upload_uniform, 0);
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let mut backend = RecordingBackend::default();
        let mut table = table_with(&mut backend, &[("u_color", UniformKind::Vec4)]);

        table.set(&mut backend, "u_color", UniformValue::Float(1.0));

        assert_eq!(backend.counts.upload_uniform, 0);
    }

    #[test]
    fn test_float_array_element_wise_equality() {
        let mut backend = RecordingBackend::default();
        let mut table = table_with(&mut backend, &[("u_weights", UniformKind::FloatArray)]);

        table.set(&mut backend, "u_weights", UniformValue::FloatArray(vec![1.0, 2.0, 3.0]));
        table.set(&mut backend, "u_weights", UniformValue::FloatArray(vec![1.0, 2.0, 3.0]));
        table.set(&mut backend, "u_weights", UniformValue::FloatArray(vec![1.0, 2.5, 3.0]));

        assert_eq!(backend.counts.upload_uniform, 2);
    }

    #[test]
    fn test_nan_bits_are_stable() {
        let mut backend = RecordingBackend::default();
        let mut table = table_with(&mut backend, &[("u_scale", UniformKind::Float)]);

        table.set(&mut backend, "u_scale", UniformValue::Float(f32::NAN));
        table.set(&mut backend, "u_scale", UniformValue::Float(f32::NAN));

        // Identical NaN bit patterns are "unchanged" under bitwise equality
        assert_eq!(backend.counts.upload_uniform, 1);
    }

    #[test]
    fn test_sampler_uploads_unit_once_but_always_routes_binding() {
        let mut backend = RecordingBackend::default();
        let mut states = StateCache::new(16);
        let texture_a = backend.make_texture();
        let texture_b = backend.make_texture();
        let mut table = table_with(&mut backend, &[("u_albedo", UniformKind::Sampler)]);

        table.set_sampler(&mut backend, &mut states, "u_albedo", TextureKind::Texture2D, texture_a, 2);
        table.set_sampler(&mut backend, &mut states, "u_albedo", TextureKind::Texture2D, texture_a, 2);
        assert_eq!(backend.counts.upload_uniform, 1);
        assert_eq!(backend.counts.bind_texture, 1);

        // New texture on the same unit: bind goes out, the int upload does not
        table.set_sampler(&mut backend, &mut states, "u_albedo", TextureKind::Texture2D, texture_b, 2);
        assert_eq!(backend.counts.upload_uniform, 1);
        assert_eq!(backend.counts.bind_texture, 2);

        // New unit: both go out
        table.set_sampler(&mut backend, &mut states, "u_albedo", TextureKind::Texture2D, texture_b, 3);
        assert_eq!(backend.counts.upload_uniform, 2);
        assert_eq!(backend.counts.bind_texture, 3);
    }

    #[test]
    fn test_sampler_via_plain_set_is_rejected() {
        let mut backend = RecordingBackend::default();
        let mut table = table_with(&mut backend, &[("u_albedo", UniformKind::Sampler)]);

        table.set(&mut backend, "u_albedo", UniformValue::Sampler(0));
        assert_eq!(backend.counts.upload_uniform, 0);
    }
}
