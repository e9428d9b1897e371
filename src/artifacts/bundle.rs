use std::fmt;

use super::resolver::Slot;
use super::{InverseMap, Predict, PredictTable, Transform};

// ---------------------------------------------------------------------------
// ArtifactBundle – the components resolved at start-up
// ---------------------------------------------------------------------------

/// Optional components available to the assembler.
///
/// Built once (by the resolver, or by the `with_*` builders in tests) and
/// only read afterwards. When `pipeline` is set the other slots are ignored.
#[derive(Default)]
pub struct ArtifactBundle {
    pipeline: Option<Box<dyn PredictTable>>,
    model: Option<Box<dyn Predict>>,
    scaler: Option<Box<dyn Transform>>,
    feature_order: Option<Vec<String>>,
    label_decoder: Option<Box<dyn InverseMap>>,
}

impl ArtifactBundle {
    pub fn with_pipeline(mut self, pipeline: impl PredictTable + 'static) -> Self {
        self.pipeline = Some(Box::new(pipeline));
        self
    }

    pub fn with_model(mut self, model: impl Predict + 'static) -> Self {
        self.model = Some(Box::new(model));
        self
    }

    pub fn with_scaler(mut self, scaler: impl Transform + 'static) -> Self {
        self.scaler = Some(Box::new(scaler));
        self
    }

    pub fn with_feature_order(mut self, columns: Vec<String>) -> Self {
        self.feature_order = Some(columns);
        self
    }

    pub fn with_label_decoder(mut self, decoder: impl InverseMap + 'static) -> Self {
        self.label_decoder = Some(Box::new(decoder));
        self
    }

    pub fn pipeline(&self) -> Option<&dyn PredictTable> {
        self.pipeline.as_deref()
    }

    pub fn model(&self) -> Option<&dyn Predict> {
        self.model.as_deref()
    }

    pub fn scaler(&self) -> Option<&dyn Transform> {
        self.scaler.as_deref()
    }

    pub fn feature_order(&self) -> Option<&[String]> {
        self.feature_order.as_deref()
    }

    pub fn label_decoder(&self) -> Option<&dyn InverseMap> {
        self.label_decoder.as_deref()
    }

    /// Populated slots, in resolver lookup order.
    pub fn loaded_slots(&self) -> Vec<Slot> {
        let present = [
            (Slot::Pipeline, self.pipeline.is_some()),
            (Slot::Model, self.model.is_some()),
            (Slot::Scaler, self.scaler.is_some()),
            (Slot::LabelDecoder, self.label_decoder.is_some()),
            (Slot::FeatureOrder, self.feature_order.is_some()),
        ];
        present
            .into_iter()
            .filter_map(|(slot, loaded)| loaded.then_some(slot))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded_slots().is_empty()
    }
}

impl fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("loaded", &self.loaded_slots())
            .field("feature_order", &self.feature_order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::model::{Estimator, LabelEncoder, Scaler};

    #[test]
    fn empty_by_default() {
        let bundle = ArtifactBundle::default();
        assert!(bundle.is_empty());
        assert!(bundle.model().is_none());
        assert!(bundle.pipeline().is_none());
    }

    #[test]
    fn reports_loaded_slots() {
        let bundle = ArtifactBundle::default()
            .with_feature_order(vec!["Final_Score".into()])
            .with_model(Estimator::Constant { value: 1.0 })
            .with_scaler(Scaler::Standard {
                mean: vec![0.0],
                scale: vec![1.0],
            })
            .with_label_decoder(LabelEncoder {
                classes: vec!["F".into()],
            });
        assert_eq!(
            bundle.loaded_slots(),
            vec![
                Slot::Model,
                Slot::Scaler,
                Slot::LabelDecoder,
                Slot::FeatureOrder
            ]
        );
    }
}
