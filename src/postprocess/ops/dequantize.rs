/// Quantization parameters corresponding to the zero_point and scale value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuantizationParameters {
    pub scale: f32,
    pub zero_point: i32,
}

impl QuantizationParameters {
    #[inline(always)]
    pub fn dequantize_value(&self, q: u8) -> f32 {
        self.scale * (q as i32 - self.zero_point) as f32
    }
}

pub(crate) trait Dequantize {
    fn dequantize(&self, quantization_parameters: QuantizationParameters) -> Vec<f32>;
}

impl Dequantize for [u8] {
    #[inline(always)]
    fn dequantize(&self, quantization_parameters: QuantizationParameters) -> Vec<f32> {
        self.iter()
            .map(|q| quantization_parameters.dequantize_value(*q))
            .collect()
    }
}
