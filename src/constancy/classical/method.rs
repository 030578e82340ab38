use serde::{Deserialize, Serialize};

use crate::constancy::classical::types::{
    EdgeBasedParams, GradientOrder, GrayWorldParams, RobustAwbParams, ShadesOfGrayParams,
    WhitePatchParams,
};
use crate::constancy::classical::{
    edge_based, gray_world, max_rgb, robust_awb, shades_of_gray, white_patch,
};
use crate::constancy::common::error::Result;
use crate::constancy::estimator::IlluminantEstimator;
use crate::constancy::image::ImageView;
use crate::constancy::vector::Illuminant;

/// A classical estimator together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClassicalMethod {
    GrayWorld(GrayWorldParams),
    WhitePatch(WhitePatchParams),
    ShadesOfGray(ShadesOfGrayParams),
    MaxRgb,
    EdgeBased(EdgeBasedParams),
    RobustAwb(RobustAwbParams),
}

impl ClassicalMethod {
    pub fn estimate(&self, image: &ImageView<'_>) -> Result<Illuminant> {
        match self {
            ClassicalMethod::GrayWorld(params) => gray_world(image, params),
            ClassicalMethod::WhitePatch(params) => white_patch(image, params),
            ClassicalMethod::ShadesOfGray(params) => shades_of_gray(image, params),
            ClassicalMethod::MaxRgb => max_rgb(image),
            ClassicalMethod::EdgeBased(params) => edge_based(image, params),
            ClassicalMethod::RobustAwb(params) => robust_awb(image, params),
        }
    }

    pub fn name(&self) -> String {
        match self {
            ClassicalMethod::GrayWorld(params) if params.exclude_percent > 0.0 => {
                format!("gray_world(exclude={}%)", params.exclude_percent)
            }
            ClassicalMethod::GrayWorld(_) => "gray_world".to_string(),
            ClassicalMethod::WhitePatch(params) if params.percentile < 100.0 => {
                format!("white_patch(p{})", params.percentile)
            }
            ClassicalMethod::WhitePatch(_) => "white_patch".to_string(),
            ClassicalMethod::ShadesOfGray(params) => format!("shades_of_gray(p={})", params.p),
            ClassicalMethod::MaxRgb => "max_rgb".to_string(),
            ClassicalMethod::EdgeBased(params) => {
                let order = match params.order {
                    GradientOrder::First => 1,
                    GradientOrder::Second => 2,
                };
                format!("edge_based(p={}, order={order})", params.p)
            }
            ClassicalMethod::RobustAwb(_) => "robust_awb".to_string(),
        }
    }
}

impl IlluminantEstimator for ClassicalMethod {
    fn name(&self) -> String {
        ClassicalMethod::name(self)
    }

    fn estimate(&self, image: &ImageView<'_>) -> Result<Illuminant> {
        ClassicalMethod::estimate(self, image)
    }
}

/// The set of classical variants benchmarked side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicalSuiteConfig {
    /// Minkowski orders for shades of gray and edge based.
    pub shades_of_gray_p_values: Vec<f64>,
    /// White patch percentiles (in percent).
    pub percentile_values: Vec<f64>,
    /// Tail exclusion for the trimmed gray world variant (in percent).
    pub gray_world_exclude_percent: f64,
    pub robust_awb: RobustAwbParams,
}

impl Default for ClassicalSuiteConfig {
    fn default() -> Self {
        Self {
            shades_of_gray_p_values: vec![1.0, 6.0],
            percentile_values: vec![90.0, 95.0, 99.0],
            gray_world_exclude_percent: 5.0,
            robust_awb: RobustAwbParams::default(),
        }
    }
}

impl ClassicalSuiteConfig {
    pub fn methods(&self) -> Vec<ClassicalMethod> {
        let mut methods = vec![ClassicalMethod::GrayWorld(GrayWorldParams::default())];
        if self.gray_world_exclude_percent > 0.0 {
            methods.push(ClassicalMethod::GrayWorld(GrayWorldParams::with_exclusion(
                self.gray_world_exclude_percent,
            )));
        }
        methods.push(ClassicalMethod::WhitePatch(WhitePatchParams::default()));
        methods.extend(
            self.percentile_values
                .iter()
                .map(|&p| ClassicalMethod::WhitePatch(WhitePatchParams::robust(p))),
        );
        methods.extend(
            self.shades_of_gray_p_values
                .iter()
                .map(|&p| ClassicalMethod::ShadesOfGray(ShadesOfGrayParams::with_p(p))),
        );
        methods.push(ClassicalMethod::MaxRgb);
        methods.extend(
            self.shades_of_gray_p_values
                .iter()
                .map(|&p| ClassicalMethod::EdgeBased(EdgeBasedParams::with_p(p))),
        );
        methods.push(ClassicalMethod::RobustAwb(self.robust_awb));
        methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constancy::image::{validate, NdArray};

    #[test]
    fn test_default_suite_contents() {
        let methods = ClassicalSuiteConfig::default().methods();
        let names: Vec<String> = methods.iter().map(ClassicalMethod::name).collect();
        assert_eq!(
            names,
            vec![
                "gray_world",
                "gray_world(exclude=5%)",
                "white_patch",
                "white_patch(p90)",
                "white_patch(p95)",
                "white_patch(p99)",
                "shades_of_gray(p=1)",
                "shades_of_gray(p=6)",
                "max_rgb",
                "edge_based(p=1, order=1)",
                "edge_based(p=6, order=1)",
                "robust_awb",
            ]
        );
    }

    #[test]
    fn test_dispatch_matches_free_functions() {
        let pixels: Vec<[f64; 3]> = (0..16)
            .map(|i| {
                let t = f64::from(i) / 16.0;
                [0.2 + 0.5 * t, 0.3 + 0.2 * t, 0.6 - 0.3 * t]
            })
            .collect();
        let array = NdArray::from_rgb_f64(4, 4, &pixels);
        let view = validate(&array).unwrap();

        assert_eq!(
            ClassicalMethod::MaxRgb.estimate(&view).unwrap(),
            max_rgb(&view).unwrap()
        );
        let params = ShadesOfGrayParams::with_p(4.0);
        assert_eq!(
            IlluminantEstimator::estimate(&ClassicalMethod::ShadesOfGray(params), &view).unwrap(),
            shades_of_gray(&view, &params).unwrap()
        );
    }

    #[test]
    fn test_suite_serializes() {
        let config = ClassicalSuiteConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ClassicalSuiteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
