use crate::palette::Palette;
use crate::Error;
use image::Rgba;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// One legend row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    /// The class or band index the row was built from.
    pub index: usize,
    pub label: String,
    pub color: Rgba<u8>,
}

/// Display label to color mapping for the indices observed in a map,
/// kept in ascending index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

/// Build a legend from the observed `indices`.
///
/// Indices are visited in ascending order. If two indices share a label, the
/// row keeps its place and takes the color of the higher index.
pub fn build_legend<I, L, C>(indices: I, label_of: L, color_of: C) -> Legend
where
    I: IntoIterator<Item = usize>,
    L: Fn(usize) -> String,
    C: Fn(usize) -> Rgba<u8>,
{
    let mut sorted: Vec<usize> = indices.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut entries: Vec<LegendEntry> = Vec::with_capacity(sorted.len());
    for index in sorted {
        let label = label_of(index);
        let color = color_of(index);
        if let Some(e) = entries.iter_mut().find(|e| e.label == label) {
            log::warn!(
                "legend label `{}` of index `{}` overwritten by index `{}`",
                label,
                e.index,
                index
            );
            e.index = index;
            e.color = color;
        } else {
            entries.push(LegendEntry {
                index,
                label,
                color,
            });
        }
    }
    Legend { entries }
}

impl Legend {
    /// Legend of the observed `indices` looked up in `palette`.
    pub fn from_palette(indices: &BTreeSet<u8>, palette: &Palette) -> Result<Self, Error> {
        if let Some(i) = indices.iter().find(|i| **i as usize >= palette.len()) {
            return Err(Error::ArgumentError(format!(
                "Legend index `{}` out of palette range `{}`",
                i,
                palette.len()
            )));
        }
        Ok(build_legend(
            indices.iter().map(|i| *i as usize),
            |i| palette.label(i).unwrap_or_default().to_string(),
            |i| palette.color(i).unwrap_or(Rgba([0, 0, 0, 0])),
        ))
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
    pub fn entries(&self) -> &[LegendEntry] {
        self.entries.as_slice()
    }

    #[inline(always)]
    pub fn iter(&self) -> std::slice::Iter<'_, LegendEntry> {
        self.entries.iter()
    }

    pub fn get(&self, label: &str) -> Option<Rgba<u8>> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.color)
    }

    #[inline(always)]
    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}

impl<'a> IntoIterator for &'a Legend {
    type Item = &'a LegendEntry;
    type IntoIter = std::slice::Iter<'a, LegendEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Legend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "    No Entry");
        }
        for e in &self.entries {
            let [r, g, b, a] = e.color.0;
            writeln!(
                f,
                "    #{} {}: #{:02X}{:02X}{:02X}{:02X}",
                e.index, e.label, r, g, b, a
            )?;
        }
        Ok(())
    }
}
