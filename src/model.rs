use anyhow::Result;
use candle_core::utils::{cuda_is_available, metal_is_available};
use candle_core::{D, DType, Device, Tensor};
use candle_nn::ops::softmax;
use candle_nn::{Conv2d, Conv2dConfig, Linear, Module, VarBuilder, conv2d, linear};
use std::path::Path;

/// Compact convolutional ripeness classifier.
///
/// Weights live in a `model.safetensors` file under the per-produce-type
/// artifact directory. Input is the preprocessor's NHWC batch-of-one
/// tensor; output is a softmax probability row, one entry per class.
pub struct RipenessModel {
    conv1: Conv2d,
    conv2: Conv2d,
    conv3: Conv2d,
    head: Linear,
    device: Device,
}

impl RipenessModel {
    pub fn device(cpu: bool) -> Result<Device> {
        if cpu {
            Ok(Device::Cpu)
        } else if metal_is_available() {
            tracing::info!("Using metal acceleration");
            Ok(Device::new_metal(0)?)
        } else if cuda_is_available() {
            tracing::info!("Using CUDA GPU acceleration");
            Ok(Device::new_cuda(0)?)
        } else {
            tracing::info!(
                "CUDA not available, running on CPU. To run on GPU, build with `--features cuda`"
            );
            Ok(Device::Cpu)
        }
    }

    /// Load model weights from an artifact path.
    ///
    /// A directory artifact is expected to contain `model.safetensors`;
    /// anything else is treated as a safetensors file directly. Legacy
    /// `keras_model.h5` artifacts fail here and the registry degrades the
    /// produce type to mock predictions.
    #[tracing::instrument(skip(device), fields(path = %path.display()))]
    pub fn load(path: &Path, num_classes: usize, device: &Device) -> Result<Self> {
        let weights = if path.is_dir() {
            path.join("model.safetensors")
        } else {
            path.to_path_buf()
        };

        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, device)? };

        let cfg = Conv2dConfig {
            padding: 1,
            ..Default::default()
        };
        let conv1 = conv2d(3, 16, 3, cfg, vb.pp("conv1"))?;
        let conv2 = conv2d(16, 32, 3, cfg, vb.pp("conv2"))?;
        let conv3 = conv2d(32, 64, 3, cfg, vb.pp("conv3"))?;
        let head = linear(64, num_classes, vb.pp("head"))?;

        Ok(Self {
            conv1,
            conv2,
            conv3,
            head,
            device: device.clone(),
        })
    }

    /// Run the forward pass and return the first (only) batch row.
    pub fn predict(&self, input: &Tensor) -> candle_core::Result<Vec<f32>> {
        // NHWC from the preprocessor, NCHW for convolution.
        let x = input.to_device(&self.device)?.permute((0, 3, 1, 2))?;
        let x = self.conv1.forward(&x)?.relu()?.max_pool2d(2)?;
        let x = self.conv2.forward(&x)?.relu()?.max_pool2d(2)?;
        let x = self.conv3.forward(&x)?.relu()?.max_pool2d(2)?;
        // Global average pool over the spatial dims.
        let x = x.mean(D::Minus1)?.mean(D::Minus1)?;
        let logits = self.head.forward(&x)?;
        let probs = softmax(&logits, 1)?;
        probs.get(0)?.to_vec1::<f32>()
    }
}
