use crate::tensor::ScoreTensor;
use crate::Error;
use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use image::DynamicImage;
use std::time::Duration;

/// Class scores delivered by an inference model.
pub type Scores = Box<dyn ScoreTensor + Send>;

/// Runs the segmentation model. Implemented outside this crate.
pub trait InferenceModel: Send + Sync {
    /// Start inference on `image`.
    ///
    /// The scores, or the reason there are none, must be handed to `completion`,
    /// either before returning or later from any thread. Returning `Err` means
    /// the request could not be started at all.
    fn run(&self, image: &DynamicImage, completion: InferenceCompletion) -> Result<(), Error>;
}

/// Single-shot handle resolving one inference request.
#[derive(Debug)]
pub struct InferenceCompletion {
    sender: Sender<Result<Scores, Error>>,
}

impl InferenceCompletion {
    #[inline(always)]
    pub fn complete<T: ScoreTensor + Send + 'static>(self, scores: T) {
        self.send(Ok(Box::new(scores)))
    }

    #[inline(always)]
    pub fn fail(self, error: Error) {
        self.send(Err(error))
    }

    fn send(self, result: Result<Scores, Error>) {
        if self.sender.send(result).is_err() {
            log::warn!("inference result arrived after the segmenter stopped waiting, dropped");
        }
    }
}

/// The receiving side of an [`InferenceCompletion`].
pub(crate) struct PendingInference {
    receiver: Receiver<Result<Scores, Error>>,
}

#[inline(always)]
pub(crate) fn inference_channel() -> (InferenceCompletion, PendingInference) {
    let (sender, receiver) = crossbeam::channel::bounded(1);
    (InferenceCompletion { sender }, PendingInference { receiver })
}

impl PendingInference {
    /// Block until the model resolves the request, at most `timeout` if given.
    pub(crate) fn wait(self, timeout: Option<Duration>) -> Result<Scores, Error> {
        let dropped = || {
            Error::InferenceError("inference model dropped the request without a result".into())
        };
        match timeout {
            Some(t) => match self.receiver.recv_timeout(t) {
                Ok(result) => result,
                Err(RecvTimeoutError::Timeout) => Err(Error::InferenceTimeout(t)),
                Err(RecvTimeoutError::Disconnected) => Err(dropped()),
            },
            None => self.receiver.recv().map_err(|_| dropped())?,
        }
    }
}
