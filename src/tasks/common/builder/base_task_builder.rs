use crate::tasks::common::InferenceModel;
use std::time::Duration;

pub(crate) type ModelLoader = Box<dyn FnOnce() -> Result<Box<dyn InferenceModel>, String>>;

pub(crate) struct BaseTaskBuilder {
    /// Produces the inference model when the task is finalized.
    pub model_loader: Option<ModelLoader>,

    /// How long to wait for the scores of one image. `None` waits forever.
    pub inference_timeout: Option<Duration>,
}

impl BaseTaskBuilder {
    pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_secs(30);
}

impl Default for BaseTaskBuilder {
    fn default() -> Self {
        Self {
            model_loader: None,
            inference_timeout: Some(Self::DEFAULT_INFERENCE_TIMEOUT),
        }
    }
}

macro_rules! base_builder_impl {
    () => {
        /// Use an already initialized inference model.
        #[inline(always)]
        pub fn model<M: crate::tasks::common::InferenceModel + 'static>(mut self, model: M) -> Self {
            self.base_task_builder.model_loader = Some(Box::new(move || {
                Ok(Box::new(model) as Box<dyn crate::tasks::common::InferenceModel>)
            }));
            self
        }

        /// Initialize the inference model when the task is finalized.
        /// A loader failure is reported as [`crate::Error::ModelInitializationError`].
        #[inline(always)]
        pub fn model_loader<F, M, E>(mut self, model_loader: F) -> Self
        where
            F: FnOnce() -> Result<M, E> + 'static,
            M: crate::tasks::common::InferenceModel + 'static,
            E: std::fmt::Display,
        {
            self.base_task_builder.model_loader = Some(Box::new(move || {
                model_loader()
                    .map(|m| Box::new(m) as Box<dyn crate::tasks::common::InferenceModel>)
                    .map_err(|e| e.to_string())
            }));
            self
        }

        /// Upper bound on the wait for the scores of one image, default 30 seconds.
        #[inline(always)]
        pub fn inference_timeout(mut self, inference_timeout: std::time::Duration) -> Self {
            self.base_task_builder.inference_timeout = Some(inference_timeout);
            self
        }

        /// Wait for the inference model without a deadline.
        #[inline(always)]
        pub fn no_inference_timeout(mut self) -> Self {
            self.base_task_builder.inference_timeout = None;
            self
        }
    };
}

macro_rules! base_task_builder_check_and_get_model {
    ( $self:ident ) => {{
        if let Some(t) = $self.base_task_builder.inference_timeout {
            if t.is_zero() {
                return Err(crate::Error::ArgumentError(
                    "Inference timeout must be positive, use `no_inference_timeout` to wait forever"
                        .into(),
                ));
            }
        }
        match $self.base_task_builder.model_loader.take() {
            Some(model_loader) => model_loader().map_err(crate::Error::ModelInitializationError)?,
            None => {
                return Err(crate::Error::ModelInitializationError(
                    "Must use `model` or `model_loader` to specify a model".into(),
                ));
            }
        }
    }};
}
