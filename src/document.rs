use std::sync::Arc;

use egui::{Pos2, Vec2};
use image::RgbaImage;

use crate::geometry::hit_test;
use crate::id_generator::IdGenerator;
use crate::region::{Region, RegionId};

/// The base image plus the live region list drawn over it.
///
/// Regions are stored bottom to top: later regions render over earlier ones
/// and win hit tests.
#[derive(Debug, Clone, Default)]
pub struct Document {
    image: Option<Arc<RgbaImage>>,
    regions: Vec<Region>,
    ids: IdGenerator,
    /// Where the image came from, if known.
    source_name: Option<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&Arc<RgbaImage>> {
        self.image.as_ref()
    }

    pub fn image_size(&self) -> Option<Vec2> {
        self.image
            .as_ref()
            .map(|image| Vec2::new(image.width() as f32, image.height() as f32))
    }

    /// Swaps in a new base image and drops every region. Id numbering is left
    /// alone; callers decide whether it restarts.
    pub fn set_image(&mut self, image: Arc<RgbaImage>) {
        self.image = Some(image);
        self.regions.clear();
    }

    pub fn take_image(&mut self) -> Option<Arc<RgbaImage>> {
        self.regions.clear();
        self.source_name = None;
        self.image.take()
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn set_source_name(&mut self, name: Option<String>) {
        self.source_name = name;
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn set_regions(&mut self, regions: Vec<Region>) {
        self.regions = regions;
    }

    pub fn add_region(&mut self, region: Region) {
        self.regions.push(region);
    }

    pub fn remove_region(&mut self, id: RegionId) -> bool {
        let before = self.regions.len();
        self.regions.retain(|r| r.id != id);
        self.regions.len() != before
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| r.id == id)
    }

    /// The topmost region whose box contains `pos`.
    pub fn region_at(&self, pos: Pos2) -> Option<&Region> {
        self.regions.iter().rev().find(|r| hit_test(pos, r))
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    pub fn next_id(&mut self) -> RegionId {
        self.ids.generate_id()
    }
}
