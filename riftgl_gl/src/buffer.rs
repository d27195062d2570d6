use std::{ffi::c_void, marker::PhantomData, mem};

use crate::{has_handle, transmutable_u32};
use gl::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessFrequency {
    /// Modified once, used a few times
    Stream,
    /// Modified once, used many times
    #[default]
    Static,
    /// Modified many times, used many times
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessNature {
    /// Modified by app, used in draw and spec commands
    #[default]
    Draw,
    /// Modified by reading from GL, used to return data to app
    Read,
    /// Modified by reading from GL, used in draw and spec commands
    Copy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataUsage {
    frequency: AccessFrequency,
    nature: AccessNature,
}

use AccessFrequency as Freq;
use AccessNature as Nat;

impl DataUsage {
    pub const STATIC_DRAW: Self = Self::new(Freq::Static, Nat::Draw);

    pub const fn new(frequency: Freq, nature: Nat) -> Self {
        Self { frequency, nature }
    }

    pub const fn to_u32(self) -> u32 {
        match (self.frequency, self.nature) {
            (Freq::Stream, Nat::Draw) => gl::STREAM_DRAW,
            (Freq::Static, Nat::Draw) => gl::STATIC_DRAW,
            (Freq::Dynamic, Nat::Draw) => gl::DYNAMIC_DRAW,

            (Freq::Stream, Nat::Copy) => gl::STREAM_COPY,
            (Freq::Static, Nat::Copy) => gl::STATIC_COPY,
            (Freq::Dynamic, Nat::Copy) => gl::DYNAMIC_COPY,

            (Freq::Stream, Nat::Read) => gl::STREAM_READ,
            (Freq::Static, Nat::Read) => gl::STATIC_READ,
            (Freq::Dynamic, Nat::Read) => gl::DYNAMIC_READ,
        }
    }
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferBindTarget {
    /// Vertex attributes
    ArrayBuffer = gl::ARRAY_BUFFER,
    /// Vertex array indices
    ElementArray = gl::ELEMENT_ARRAY_BUFFER,
}
transmutable_u32!(BufferBindTarget);

/// Fixes the bind target and usage hint of a [`Buffer`] at compile time.
pub trait BufferKind {
    const TARGET: BufferBindTarget;
    const USAGE: DataUsage = DataUsage::STATIC_DRAW;
}

pub struct ArrayKind;
impl BufferKind for ArrayKind {
    const TARGET: BufferBindTarget = BufferBindTarget::ArrayBuffer;
}

pub struct ElementKind;
impl BufferKind for ElementKind {
    const TARGET: BufferBindTarget = BufferBindTarget::ElementArray;
}

pub type VertexBuffer = Buffer<ArrayKind>;
pub type IndexBuffer = Buffer<ElementKind>;

/// Source of one buffer upload.
///
/// Loaders only borrow the data they describe, so they cannot outlive it.
pub trait BufferLoader {
    fn data_ptr(&self) -> *const c_void;
    fn byte_size(&self) -> GLsizeiptr;
}

/// Views a contiguous sequence, such as a `Vec<T>` or a slice.
#[derive(Debug, Clone, Copy)]
pub struct SliceLoader<'a, T> {
    data: &'a [T],
}

impl<'a, T> SliceLoader<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self { data }
    }
}

impl<'a, T> From<&'a [T]> for SliceLoader<'a, T> {
    fn from(data: &'a [T]) -> Self {
        Self::new(data)
    }
}

impl<'a, T> From<&'a Vec<T>> for SliceLoader<'a, T> {
    fn from(data: &'a Vec<T>) -> Self {
        Self::new(data)
    }
}

impl<T> BufferLoader for SliceLoader<'_, T> {
    fn data_ptr(&self) -> *const c_void {
        self.data.as_ptr().cast()
    }

    fn byte_size(&self) -> GLsizeiptr {
        size_of_val(self.data) as GLsizeiptr
    }
}

/// Views a fixed-size array.
#[derive(Debug, Clone, Copy)]
pub struct ArrayLoader<'a, T, const N: usize> {
    data: &'a [T; N],
}

impl<'a, T, const N: usize> ArrayLoader<'a, T, N> {
    pub fn new(data: &'a [T; N]) -> Self {
        Self { data }
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for ArrayLoader<'a, T, N> {
    fn from(data: &'a [T; N]) -> Self {
        Self::new(data)
    }
}

impl<T, const N: usize> BufferLoader for ArrayLoader<'_, T, N> {
    fn data_ptr(&self) -> *const c_void {
        self.data.as_ptr().cast()
    }

    fn byte_size(&self) -> GLsizeiptr {
        (size_of::<T>() * N) as GLsizeiptr
    }
}

/// Exclusive owner of one GL buffer object.
///
/// A handle of 0 means the buffer was emptied by [`Buffer::take`];
/// dropping it does nothing.
pub struct Buffer<K: BufferKind> {
    handle: GLuint,
    // GL objects belong to the context thread.
    _kind: PhantomData<*const K>,
}
has_handle!(Buffer<K: BufferKind>);

impl<K: BufferKind> Drop for Buffer<K> {
    fn drop(&mut self) {
        if self.handle != 0 {
            log::trace!("deleting buffer {}", self.handle);
            unsafe {
                gl::DeleteBuffers(1, &self.handle);
            }
        }
    }
}

impl<K: BufferKind> Default for Buffer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: BufferKind> Buffer<K> {
    pub fn new() -> Self {
        let mut handle = 0;
        unsafe { gl::GenBuffers(1, &mut handle) };
        assert_ne!(handle, 0, "Buffer generation failed.");
        log::trace!("generated buffer {handle} for {:?}", K::TARGET);
        Self {
            handle,
            _kind: PhantomData,
        }
    }

    pub fn from_slice<T>(data: &[T]) -> Self {
        let buffer = Self::new();
        buffer.load_slice(data);
        buffer
    }

    pub fn from_array<T, const N: usize>(data: &[T; N]) -> Self {
        let buffer = Self::new();
        buffer.load_array(data);
        buffer
    }

    /// Adopts an existing buffer name.
    ///
    /// # Safety
    /// `handle` must be 0 or a buffer name not owned by anything else,
    /// since it is deleted on drop.
    pub unsafe fn from_raw(handle: GLuint) -> Self {
        Self {
            handle,
            _kind: PhantomData,
        }
    }

    /// Releases ownership without deleting the buffer.
    pub fn into_raw(self) -> GLuint {
        let handle = self.handle;
        mem::forget(self);
        handle
    }

    /// Moves the handle out, leaving `self` holding 0.
    pub fn take(&mut self) -> Self {
        Self {
            handle: mem::replace(&mut self.handle, 0),
            _kind: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.handle == 0
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindBuffer(K::TARGET.to_u32(), self.handle);
        }
    }

    pub fn unbind() {
        unsafe {
            gl::BindBuffer(K::TARGET.to_u32(), 0);
        }
    }

    pub fn load(&self, loader: &impl BufferLoader) {
        self.bind();
        unsafe {
            gl::BufferData(
                K::TARGET.to_u32(),
                loader.byte_size(),
                loader.data_ptr(),
                K::USAGE.to_u32(),
            );
        }
    }

    pub fn load_slice<T>(&self, data: &[T]) {
        self.load(&SliceLoader::new(data));
    }

    pub fn load_array<T, const N: usize>(&self, data: &[T; N]) {
        self.load(&ArrayLoader::new(data));
    }
}
