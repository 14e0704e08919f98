//! Spatial index over one image's detections

use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};
use std::collections::BTreeMap;

use crate::vision::{BoundingBox, Detection};

type IndexedBox = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Detections of a single image plus an R-tree over their bounding boxes
///
/// Built fresh for every image and never shared across images, since
/// detection ids are only unique within one image.
pub struct DetectionIndex {
    detections: BTreeMap<usize, Detection>,
    tree: RTree<IndexedBox>,
}

impl DetectionIndex {
    /// Index every detection's bounding box by its id
    ///
    /// A repeated id replaces the earlier detection.
    pub fn build(detections: Vec<Detection>) -> Self {
        let detections: BTreeMap<usize, Detection> =
            detections.into_iter().map(|d| (d.id, d)).collect();

        let entries = detections
            .values()
            .map(|d| {
                let rect = Rectangle::from_corners(
                    [d.bbox.min_x, d.bbox.min_y],
                    [d.bbox.max_x, d.bbox.max_y],
                );
                GeomWithData::new(rect, d.id)
            })
            .collect();

        Self {
            detections,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Ids of every detection whose box intersects `rect`, in ascending order
    pub fn query(&self, rect: &BoundingBox) -> Vec<usize> {
        let envelope = AABB::from_corners([rect.min_x, rect.min_y], [rect.max_x, rect.max_y]);
        let mut ids: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.data)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn get(&self, id: usize) -> Option<&Detection> {
        self.detections.get(&id)
    }

    /// All detections in id order
    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.detections.values()
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}
