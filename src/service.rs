use std::path::PathBuf;

use crate::error::ClassifyError;
use crate::registry::ModelRegistry;
use crate::types::{ClassificationResponse, ProduceType};
use crate::{codec, predictor, preprocess, response};

/// The single entry point the transport layer drives: decode, preprocess,
/// resolve a model, predict, and shape the response.
pub struct ClassifierService {
    registry: ModelRegistry,
}

impl ClassifierService {
    pub fn new(registry: ModelRegistry) -> Self {
        Self { registry }
    }

    pub fn from_options(models_dir: PathBuf, use_mock: bool, cpu_only: bool) -> Self {
        Self::new(ModelRegistry::new(models_dir, use_mock, cpu_only))
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Classify one produce image. Synchronous end to end; no retries.
    #[tracing::instrument(skip(self, image_base64), fields(produce_type = %produce_type))]
    pub fn classify(
        &self,
        image_base64: &str,
        produce_type: &str,
    ) -> Result<ClassificationResponse, ClassifyError> {
        let produce_type: ProduceType = produce_type.parse()?;

        let image = codec::decode_image(image_base64)?;
        let input = preprocess::preprocess(&image)?;

        let handle = self.registry.resolve(produce_type);
        let probs = predictor::predict(&handle, &input, produce_type)?;

        Ok(response::build(&probs, produce_type))
    }
}
