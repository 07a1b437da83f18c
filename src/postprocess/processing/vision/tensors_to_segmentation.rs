use super::*;
use crate::palette::Palette;
use image::{GrayImage, Luma};
use std::collections::BTreeSet;

/// Converts a class score tensor into a category mask and a confidence mask.
#[derive(Debug, Clone, Copy)]
pub struct TensorsToSegmentation {
    activation: Activation,
    /// The most classes a tensor may declare, i.e. the class palette length.
    max_classes: usize,
}

impl Default for TensorsToSegmentation {
    #[inline(always)]
    fn default() -> Self {
        Self::new(Activation::None)
    }
}

impl TensorsToSegmentation {
    #[inline(always)]
    pub fn new(activation: Activation) -> Self {
        Self {
            activation,
            max_classes: Palette::TISSUE.len(),
        }
    }

    /// Limit the class count to the length of `palette`, which will color the category mask.
    #[inline(always)]
    pub fn with_class_palette(mut self, palette: &Palette) -> Self {
        self.max_classes = palette.len();
        self
    }

    #[inline(always)]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    #[inline(always)]
    pub fn max_classes(&self) -> usize {
        self.max_classes
    }

    /// Decode every pixel of `tensor`: the category is the argmax over the
    /// class scores, ties going to the lowest index, and the confidence band
    /// comes from the winning score.
    ///
    /// Any unreadable score aborts the whole pass.
    pub fn decode<T: ScoreTensor + ?Sized>(&self, tensor: &T) -> Result<SegmentationMaps, Error> {
        let (width, height, classes) = (tensor.width(), tensor.height(), tensor.class_count());
        if classes == 0 {
            return Err(Error::ModelInconsistentError(
                "Score tensor must have at least one class".into(),
            ));
        }
        let max_classes = self.max_classes.min(u8::MAX as usize + 1);
        if classes > max_classes {
            return Err(Error::ModelInconsistentError(format!(
                "Expect at most `{}` classes in score tensor, but got `{}`",
                max_classes, classes
            )));
        }

        let mut category_mask = GrayImage::new(width, height);
        let mut confidence_mask = GrayImage::new(width, height);
        let mut class_indices = BTreeSet::new();
        let mut confidence_indices = BTreeSet::new();
        let mut scores = vec![0f32; classes];

        for y in 0..height {
            for x in 0..width {
                for (class, s) in scores.iter_mut().enumerate() {
                    *s = tensor
                        .score(x, y, class)
                        .ok_or(Error::TensorReadError { x, y, class })?;
                }
                // the class always comes from the raw scores
                let (max_index, mut max_score) = arg_max(&scores);
                if self.activation == Activation::Softmax {
                    scores.softmax();
                    max_score = scores[max_index];
                }

                let class_index = max_index as u8;
                category_mask.put_pixel(x, y, Luma([class_index]));
                class_indices.insert(class_index);

                let confidence_index = confidence_bucket(max_score);
                confidence_mask.put_pixel(x, y, Luma([confidence_index]));
                confidence_indices.insert(confidence_index);
            }
        }

        log::debug!(
            "decoded `{}x{}x{}` scores: classes {:?}, confidence bands {:?}",
            width,
            height,
            classes,
            class_indices,
            confidence_indices
        );

        Ok(SegmentationMaps {
            category_mask,
            class_indices,
            confidence_mask,
            confidence_indices,
        })
    }
}

/// Decode with raw scores, see [`TensorsToSegmentation::decode`].
#[inline(always)]
pub fn decode<T: ScoreTensor + ?Sized>(tensor: &T) -> Result<SegmentationMaps, Error> {
    TensorsToSegmentation::default().decode(tensor)
}

/// Strict greater-than scan from a zero floor, so the earliest maximum wins
/// and all non-positive scores resolve to `(0, 0.)`.
#[inline(always)]
fn arg_max(scores: &[f32]) -> (usize, f32) {
    let mut max_index = 0;
    let mut max_score = 0f32;
    for (i, s) in scores.iter().enumerate() {
        if *s > max_score {
            max_score = *s;
            max_index = i;
        }
    }
    (max_index, max_score)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tensor::{DenseScores, ScoreLayout};

    struct Broken;

    impl ScoreTensor for Broken {
        fn width(&self) -> u32 {
            2
        }

        fn height(&self) -> u32 {
            2
        }

        fn class_count(&self) -> usize {
            3
        }

        fn score(&self, x: u32, y: u32, class: usize) -> Option<f32> {
            if x == 1 && y == 1 && class == 2 {
                None
            } else {
                Some(0.5)
            }
        }
    }

    fn scores(width: u32, height: u32, classes: usize, data: Vec<f32>) -> DenseScores {
        DenseScores::new(ScoreLayout::NHWC, width, height, classes, data).unwrap()
    }

    #[test]
    fn test_arg_max() {
        assert_eq!(arg_max(&[0.1, 0.7, 0.2]), (1, 0.7));
        assert_eq!(arg_max(&[0.1, 0.4, 0.4]), (1, 0.4));
        assert_eq!(arg_max(&[-1., -0.5]), (0, 0.));
        assert_eq!(arg_max(&[0., 0.]), (0, 0.));
    }

    #[test]
    fn test_tie_break_lowest_index() {
        let t = scores(1, 1, 7, vec![0.01, 0.02, 0.9, 0.03, 0.01, 0.9, 0.03]);
        let maps = decode(&t).unwrap();
        assert_eq!(maps.class_at(0, 0), Some(2));
        assert_eq!(maps.confidence_at(0, 0), Some(1));
    }

    #[test]
    fn test_decode_two_by_two() {
        let t = scores(
            2,
            2,
            3,
            vec![0.2, 0.3, 0.5, 0.9, 0.05, 0.05, 0.4, 0.4, 0.2, 0.1, 0.1, 0.8],
        );
        let maps = decode(&t).unwrap();
        assert_eq!(maps.category_mask.as_raw(), &vec![2, 0, 0, 2]);
        assert_eq!(maps.class_indices, BTreeSet::from([0u8, 2]));
        assert_eq!(maps.confidence_mask.as_raw(), &vec![5, 1, 6, 2]);
        assert_eq!(maps.confidence_indices, BTreeSet::from([1u8, 2, 5, 6]));
    }

    #[test]
    fn test_decode_bounds() {
        let data: Vec<f32> = (0..4 * 3 * 5).map(|i| ((i * 37) % 101) as f32 / 100.).collect();
        let t = scores(4, 3, 5, data);
        let maps = decode(&t).unwrap();
        assert_eq!((maps.width(), maps.height()), (4, 3));
        assert!(maps.category_mask.pixels().all(|p| (p[0] as usize) < 5));
        assert!(maps.confidence_mask.pixels().all(|p| p[0] < 10));
        for c in &maps.class_indices {
            assert!(maps.category_mask.pixels().any(|p| p[0] == *c));
        }
    }

    #[test]
    fn test_read_error_is_fatal() {
        match decode(&Broken) {
            Err(Error::TensorReadError { x, y, class }) => {
                assert_eq!((x, y, class), (1, 1, 2));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_class_count_check() {
        let t = scores(1, 1, 8, vec![0.1; 8]);
        assert!(matches!(decode(&t), Err(Error::ModelInconsistentError(_))));
        let t = scores(1, 1, 0, vec![]);
        assert!(matches!(decode(&t), Err(Error::ModelInconsistentError(_))));

        let t = scores(1, 1, 10, vec![0.1; 10]);
        let maps = TensorsToSegmentation::default()
            .with_class_palette(&Palette::CONFIDENCE)
            .decode(&t)
            .unwrap();
        assert_eq!(maps.class_at(0, 0), Some(0));
    }

    #[test]
    fn test_softmax_activation() {
        let t = scores(1, 1, 3, vec![1., 2., 3.]);
        let raw = decode(&t).unwrap();
        // raw score 3 lies outside every band
        assert_eq!(raw.class_at(0, 0), Some(2));
        assert_eq!(raw.confidence_at(0, 0), Some(0));

        let soft = TensorsToSegmentation::new(Activation::Softmax)
            .decode(&t)
            .unwrap();
        assert_eq!(soft.class_at(0, 0), Some(2));
        // 0.665 lies in [0.61, 0.70]
        assert_eq!(soft.confidence_at(0, 0), Some(3));
    }

    #[test]
    fn test_softmax_keeps_raw_class() {
        let softmax = TensorsToSegmentation::new(Activation::Softmax);

        // all logits negative: raw argmax stays on the zero floor
        let t = scores(1, 1, 2, vec![-2., -1.]);
        let raw = decode(&t).unwrap();
        let soft = softmax.decode(&t).unwrap();
        assert_eq!(raw.class_at(0, 0), Some(0));
        assert_eq!(soft.class_at(0, 0), raw.class_at(0, 0));
        // e^-2 / (e^-2 + e^-1) = 0.269 lies in [0.21, 0.30]
        assert_eq!(soft.confidence_at(0, 0), Some(7));

        let t = scores(1, 1, 3, vec![0.1, f32::NAN, 0.9]);
        let raw = decode(&t).unwrap();
        let soft = softmax.decode(&t).unwrap();
        assert_eq!(raw.class_at(0, 0), Some(2));
        assert_eq!(soft.class_at(0, 0), Some(2));
        assert_eq!(soft.confidence_at(0, 0), Some(0));
    }

    #[test]
    fn test_decode_nchw_matches_nhwc() {
        let nhwc = scores(
            2,
            2,
            3,
            vec![0.2, 0.3, 0.5, 0.9, 0.05, 0.05, 0.4, 0.4, 0.2, 0.1, 0.1, 0.8],
        );
        let nchw = DenseScores::new(
            ScoreLayout::NCHW,
            2,
            2,
            3,
            vec![
                0.2, 0.9, 0.4, 0.1, // class 0
                0.3, 0.05, 0.4, 0.1, // class 1
                0.5, 0.05, 0.2, 0.8, // class 2
            ],
        )
        .unwrap();
        let maps = decode(&nchw).unwrap();
        assert_eq!(maps.category_mask.as_raw(), &vec![2, 0, 0, 2]);
        assert_eq!(maps.confidence_mask.as_raw(), &vec![5, 1, 6, 2]);
        assert_eq!(maps, decode(&nhwc).unwrap());
    }

    #[test]
    fn test_empty_tensor() {
        let t = scores(0, 0, 3, vec![]);
        let maps = decode(&t).unwrap();
        assert!(maps.class_indices.is_empty());
        assert!(maps.confidence_indices.is_empty());
    }
}
