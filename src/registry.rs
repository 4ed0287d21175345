use std::path::{Path, PathBuf};

#[cfg(feature = "real-models")]
use candle_core::Device;
#[cfg(feature = "real-models")]
use std::collections::HashMap;
#[cfg(feature = "real-models")]
use std::sync::{Arc, Mutex};

#[cfg(feature = "real-models")]
use crate::model::RipenessModel;
use crate::types::ProduceType;

/// A resolved model: either loaded weights or the mock marker.
#[derive(Clone)]
pub enum ModelHandle {
    #[cfg(feature = "real-models")]
    Real(Arc<RipenessModel>),
    Mock,
}

impl ModelHandle {
    pub fn is_mock(&self) -> bool {
        matches!(self, ModelHandle::Mock)
    }
}

/// Owns at most one loaded model per produce type.
///
/// Models load lazily on first resolution and stay cached for the process
/// lifetime. Every failure mode short of success degrades to the mock
/// handle: a missing runtime, a missing artifact, and a corrupt artifact
/// all leave the service answering requests.
pub struct ModelRegistry {
    models_dir: PathBuf,
    mock_only: bool,
    #[cfg(feature = "real-models")]
    cache: Mutex<HashMap<ProduceType, ModelHandle>>,
    #[cfg(feature = "real-models")]
    device: Device,
}

impl ModelRegistry {
    #[cfg(feature = "real-models")]
    pub fn new(models_dir: PathBuf, use_mock: bool, cpu_only: bool) -> Self {
        let (device, mock_only) = if use_mock {
            tracing::info!("mock mode configured, using mock predictions for all produce types");
            (Device::Cpu, true)
        } else {
            match RipenessModel::device(cpu_only) {
                Ok(device) => (device, false),
                Err(e) => {
                    tracing::warn!(error = %e, "inference device unavailable, using mock predictions");
                    (Device::Cpu, true)
                }
            }
        };

        Self {
            models_dir,
            mock_only,
            cache: Mutex::new(HashMap::new()),
            device,
        }
    }

    #[cfg(not(feature = "real-models"))]
    pub fn new(models_dir: PathBuf, use_mock: bool, _cpu_only: bool) -> Self {
        if !use_mock {
            tracing::warn!(
                models_dir = %models_dir.display(),
                "built without the real-models feature, using mock predictions"
            );
        }
        Self {
            models_dir,
            mock_only: true,
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Resolve a produce type to a model handle, loading and caching on
    /// first use. Never fails; see the type-level degradation policy.
    pub fn resolve(&self, produce_type: ProduceType) -> ModelHandle {
        if self.mock_only {
            return ModelHandle::Mock;
        }
        self.resolve_uncached(produce_type)
    }

    #[cfg(feature = "real-models")]
    fn resolve_uncached(&self, produce_type: ProduceType) -> ModelHandle {
        // The lock is held across the load so concurrent first resolutions
        // of the same produce type initialize it once.
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = cache.get(&produce_type) {
            return handle.clone();
        }

        let handle = self.load_handle(produce_type);
        cache.insert(produce_type, handle.clone());
        handle
    }

    #[cfg(not(feature = "real-models"))]
    fn resolve_uncached(&self, _produce_type: ProduceType) -> ModelHandle {
        ModelHandle::Mock
    }

    #[cfg(feature = "real-models")]
    fn load_handle(&self, produce_type: ProduceType) -> ModelHandle {
        let base = self.models_dir.join(produce_type.as_str());
        let h5_path = base.join("keras_model.h5");
        let saved_model_path = base.join("saved_model");

        let artifact = if h5_path.exists() {
            h5_path
        } else if saved_model_path.exists() {
            saved_model_path
        } else {
            tracing::warn!(
                produce_type = %produce_type,
                expected = %h5_path.display(),
                fallback = %saved_model_path.display(),
                "no model artifact found, using mock predictions"
            );
            return ModelHandle::Mock;
        };

        let num_classes = produce_type.class_table().len();
        match RipenessModel::load(&artifact, num_classes, &self.device) {
            Ok(model) => {
                tracing::info!(
                    produce_type = %produce_type,
                    artifact = %artifact.display(),
                    "loaded ripeness model"
                );
                ModelHandle::Real(Arc::new(model))
            }
            Err(e) => {
                tracing::warn!(
                    produce_type = %produce_type,
                    artifact = %artifact.display(),
                    error = %e,
                    "failed to load model, falling back to mock predictions"
                );
                ModelHandle::Mock
            }
        }
    }
}
