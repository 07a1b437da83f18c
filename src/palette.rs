//! Fixed label and color tables for the tissue classes and the confidence bands.

use image::Rgba;
use std::collections::HashSet;

/// One row of a palette: the display label and annotation color of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub label: &'static str,
    pub color: Rgba<u8>,
}

impl PaletteEntry {
    #[inline(always)]
    pub const fn new(label: &'static str, color: [u8; 4]) -> Self {
        Self {
            label,
            color: Rgba(color),
        }
    }
}

/// Tissue classes in model output order.
pub const TISSUE_ENTRIES: [PaletteEntry; 7] = [
    PaletteEntry::new("Skin", [0x1E, 0x49, 0x28, 0xFF]),
    PaletteEntry::new("Healthy Granulation", [0x00, 0xF7, 0x72, 0xFF]),
    PaletteEntry::new("Epithelising", [0xFF, 0x14, 0x93, 0xFF]),
    PaletteEntry::new("Unhealthy Granulation", [0x0D, 0xE0, 0xE5, 0xFF]),
    PaletteEntry::new("Others", [0x1E, 0x90, 0xFF, 0xFF]),
    PaletteEntry::new("Necrosis", [0xAA, 0x6E, 0x28, 0xFF]),
    PaletteEntry::new("Slough", [0xFF, 0xFF, 0x00, 0xFF]),
];

/// Confidence bands, highest first, matching [`crate::postprocess::CONFIDENCE_BANDS`].
pub const CONFIDENCE_ENTRIES: [PaletteEntry; 10] = [
    PaletteEntry::new("91%-100%", [0x24, 0x65, 0x90, 0xFF]),
    PaletteEntry::new("81%-90%", [0x24, 0x65, 0x90, 0xFF]),
    PaletteEntry::new("71%-80%", [0x24, 0x65, 0x90, 0xFF]),
    PaletteEntry::new("61%-70%", [0x3D, 0xAC, 0xF7, 0xFF]),
    PaletteEntry::new("51%-60%", [0x79, 0xD6, 0xF9, 0xFF]),
    PaletteEntry::new("41%-50%", [0xE8, 0x7A, 0xA4, 0xFF]),
    PaletteEntry::new("31%-40%", [0xF9, 0xD9, 0x8C, 0xFF]),
    PaletteEntry::new("21%-30%", [0xB8, 0xE2, 0x33, 0xFF]),
    PaletteEntry::new("11%-20%", [0xB8, 0xE2, 0x33, 0xFF]),
    PaletteEntry::new("1%-10%", [0xB8, 0xE2, 0x33, 0xFF]),
];

/// An ordered lookup table from a small index to a [`PaletteEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    entries: &'static [PaletteEntry],
}

impl Palette {
    /// The 7 tissue classes.
    pub const TISSUE: Palette = Palette::new(&TISSUE_ENTRIES);

    /// The 10 confidence bands.
    pub const CONFIDENCE: Palette = Palette::new(&CONFIDENCE_ENTRIES);

    #[inline(always)]
    pub const fn new(entries: &'static [PaletteEntry]) -> Self {
        Self { entries }
    }

    #[inline(always)]
    pub fn entries(&self) -> &'static [PaletteEntry] {
        self.entries
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&'static PaletteEntry> {
        self.entries.get(index)
    }

    #[inline(always)]
    pub fn label(&self, index: usize) -> Option<&'static str> {
        self.get(index).map(|e| e.label)
    }

    #[inline(always)]
    pub fn color(&self, index: usize) -> Option<Rgba<u8>> {
        self.get(index).map(|e| e.color)
    }

    /// Legends are keyed by label, so two entries sharing a label would collapse.
    pub fn has_unique_labels(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.entries.len());
        self.entries.iter().all(|e| seen.insert(e.label))
    }
}

#[inline(always)]
pub fn class_color(index: usize) -> Option<Rgba<u8>> {
    Palette::TISSUE.color(index)
}

#[inline(always)]
pub fn class_label(index: usize) -> Option<&'static str> {
    Palette::TISSUE.label(index)
}

#[inline(always)]
pub fn confidence_color(index: usize) -> Option<Rgba<u8>> {
    Palette::CONFIDENCE.color(index)
}

#[inline(always)]
pub fn confidence_label(index: usize) -> Option<&'static str> {
    Palette::CONFIDENCE.label(index)
}
