//! Ownership of the current particle generation and its GPU-side handle.

use crate::error::Result;
use crate::generator::{generate, ParticleBuffer};
use crate::params::ShapeParameters;
use fnv::FnvHashSet;
use rand::prelude::*;
use smallvec::SmallVec;
use std::fmt;

/// Identifies one uploaded geometry + material pair.
///
/// Minted by [`ParticleSystemState`] from a counter that only grows, so a
/// handle is never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(u64);

impl GeometryHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GeometryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "geometry#{}", self.0)
    }
}

/// The render/scene collaborator.
///
/// `upload` allocates both the geometry and the material for a buffer;
/// `release` frees both. A released handle is never passed back in.
pub trait SceneBackend {
    fn upload(&mut self, handle: GeometryHandle, buffer: &ParticleBuffer) -> Result<()>;
    fn release(&mut self, handle: GeometryHandle);
    fn add_visual_object(&mut self, handle: GeometryHandle);
    fn remove_visual_object(&mut self, handle: GeometryHandle);
}

struct Installed {
    handle: GeometryHandle,
    buffer: ParticleBuffer,
    shape: ShapeParameters,
}

pub struct ParticleSystemState<S: SceneBackend> {
    scene: S,
    rng: StdRng,
    current: Option<Installed>,
    next_handle: u64,
    generation: u64,
}

impl<S: SceneBackend> ParticleSystemState<S> {
    /// Without a seed the random source is seeded from system entropy.
    pub fn new(scene: S, seed: Option<u64>) -> Self {
        Self {
            scene,
            rng: seeded_rng(seed),
            current: None,
            next_handle: 1,
            generation: 0,
        }
    }

    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = seeded_rng(seed);
    }

    /// Replace the current buffer and GPU handle with a freshly generated pair.
    ///
    /// The old handle is removed from the scene and released before this
    /// returns. On error nothing changes and the previous generation stays
    /// installed.
    pub fn regenerate(
        &mut self,
        count: usize,
        radius_mult: f32,
        height_mult: f32,
    ) -> Result<GeometryHandle> {
        let shape = ShapeParameters::new(radius_mult, height_mult)?;
        let buffer = generate(count, radius_mult, height_mult, &mut self.rng)?;

        let handle = GeometryHandle(self.next_handle);
        self.next_handle += 1;
        self.scene.upload(handle, &buffer)?;

        if let Some(old) = self.current.take() {
            self.scene.remove_visual_object(old.handle);
            self.scene.release(old.handle);
            log::debug!("[particles] released {}", old.handle);
        }
        self.scene.add_visual_object(handle);
        self.generation += 1;
        log::debug!(
            "[particles] generation {} -> {} ({} particles, radius {:.2}, height {:.2})",
            self.generation,
            handle,
            count,
            radius_mult,
            height_mult
        );
        self.current = Some(Installed {
            handle,
            buffer,
            shape,
        });
        Ok(handle)
    }

    pub fn current_geometry_handle(&self) -> Option<GeometryHandle> {
        self.current.as_ref().map(|c| c.handle)
    }

    pub fn current_buffer(&self) -> Option<&ParticleBuffer> {
        self.current.as_ref().map(|c| &c.buffer)
    }

    pub fn current_shape(&self) -> Option<ShapeParameters> {
        self.current.as_ref().map(|c| c.shape)
    }

    /// Number of successful regenerations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Scene backend with no GPU behind it.
///
/// Used when the graphics context is unavailable so the simulation keeps
/// running; it only tracks which handles are alive and visible.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    live: FnvHashSet<GeometryHandle>,
    visible: SmallVec<[GeometryHandle; 2]>,
    released: u64,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self, handle: GeometryHandle) -> bool {
        self.live.contains(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn visible(&self) -> &[GeometryHandle] {
        &self.visible
    }

    pub fn released_count(&self) -> u64 {
        self.released
    }
}

impl SceneBackend for HeadlessScene {
    fn upload(&mut self, handle: GeometryHandle, _buffer: &ParticleBuffer) -> Result<()> {
        self.live.insert(handle);
        Ok(())
    }

    fn release(&mut self, handle: GeometryHandle) {
        if self.live.remove(&handle) {
            self.released += 1;
        }
    }

    fn add_visual_object(&mut self, handle: GeometryHandle) {
        if !self.visible.contains(&handle) {
            self.visible.push(handle);
        }
    }

    fn remove_visual_object(&mut self, handle: GeometryHandle) {
        self.visible.retain(|h| *h != handle);
    }
}

/// A GPU backend when one could be created, otherwise [`HeadlessScene`].
///
/// Front-ends build this once at startup; the simulation runs the same either
/// way and only the headless variant skips drawing.
#[derive(Debug)]
pub enum FallbackScene<G> {
    Gpu(G),
    Headless(HeadlessScene),
}

impl<G> FallbackScene<G> {
    pub fn headless() -> Self {
        FallbackScene::Headless(HeadlessScene::new())
    }

    pub fn is_headless(&self) -> bool {
        matches!(self, FallbackScene::Headless(_))
    }

    pub fn gpu_mut(&mut self) -> Option<&mut G> {
        match self {
            FallbackScene::Gpu(g) => Some(g),
            FallbackScene::Headless(_) => None,
        }
    }
}

impl<G: SceneBackend> SceneBackend for FallbackScene<G> {
    fn upload(&mut self, handle: GeometryHandle, buffer: &ParticleBuffer) -> Result<()> {
        match self {
            FallbackScene::Gpu(g) => g.upload(handle, buffer),
            FallbackScene::Headless(h) => h.upload(handle, buffer),
        }
    }

    fn release(&mut self, handle: GeometryHandle) {
        match self {
            FallbackScene::Gpu(g) => g.release(handle),
            FallbackScene::Headless(h) => h.release(handle),
        }
    }

    fn add_visual_object(&mut self, handle: GeometryHandle) {
        match self {
            FallbackScene::Gpu(g) => g.add_visual_object(handle),
            FallbackScene::Headless(h) => h.add_visual_object(handle),
        }
    }

    fn remove_visual_object(&mut self, handle: GeometryHandle) {
        match self {
            FallbackScene::Gpu(g) => g.remove_visual_object(handle),
            FallbackScene::Headless(h) => h.remove_visual_object(handle),
        }
    }
}
