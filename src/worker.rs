//! Generate puzzles on a background thread
//!
//! Requests and responses cross the thread boundary as plain messages. Every
//! submitted request gets a token. A consumer that submits a new request before
//! the previous one finished only wants the newest answer, so `recv_latest`
//! drops responses whose token is stale.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};

use crate::collections::grid::Coord;
use crate::generate::{GenerateParams, Generator, LruCache, PuzzleCache};
use crate::puzzle::{Difficulty, Puzzle};
use crate::random::Seed;

/// Asks for a square puzzle of `size` x `size` cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub size: usize,
    pub number_count: usize,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub seed: Option<Seed>,
}

impl GenerateRequest {
    pub fn params(&self) -> GenerateParams {
        GenerateParams {
            rows: self.size,
            cols: self.size,
            number_count: self.number_count,
            difficulty: self.difficulty,
            seed: self.seed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GenerateResponse {
    Success { grid: Puzzle, trace: Vec<Coord> },
    Error { error: String },
}

/// Identifies a submitted request. Later submissions get greater tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

pub struct GenerationWorker {
    requests: Option<Sender<(RequestToken, GenerateRequest)>>,
    responses: Receiver<(RequestToken, GenerateResponse)>,
    next_token: u64,
    handle: Option<JoinHandle<()>>,
}

impl GenerationWorker {
    /// Starts a worker with an `LruCache` of default capacity
    pub fn spawn() -> Self {
        Self::spawn_with(Generator::<LruCache>::default())
    }

    pub fn spawn_with<C>(mut generator: Generator<C>) -> Self
    where
        C: PuzzleCache + Send + 'static,
    {
        let (request_sender, request_receiver) = channel::<(RequestToken, GenerateRequest)>();
        let (response_sender, response_receiver) = channel();
        let handle = thread::spawn(move || {
            for (token, request) in request_receiver {
                debug!("Worker received {:?} {:?}", token, request);
                let response = respond(&mut generator, &request);
                if response_sender.send((token, response)).is_err() {
                    break;
                }
            }
            debug!("Generation worker stopped");
        });
        Self {
            requests: Some(request_sender),
            responses: response_receiver,
            next_token: 0,
            handle: Some(handle),
        }
    }

    /// Queues a request. Returns `None` if the worker thread is gone.
    pub fn submit(&mut self, request: GenerateRequest) -> Option<RequestToken> {
        let token = RequestToken(self.next_token);
        self.requests.as_ref()?.send((token, request)).ok()?;
        self.next_token += 1;
        Some(token)
    }

    /// The token of the most recent submission
    pub fn latest_token(&self) -> Option<RequestToken> {
        self.next_token.checked_sub(1).map(RequestToken)
    }

    /// Blocks until the response to the most recent submission arrives.
    /// Earlier responses are discarded.
    pub fn recv_latest(&self) -> Option<GenerateResponse> {
        let latest = self.latest_token()?;
        loop {
            let (token, response) = self.responses.recv().ok()?;
            if token == latest {
                return Some(response);
            }
            debug!("Discarding stale response for {:?}", token);
        }
    }

    /// Like `recv_latest` without blocking
    pub fn try_recv_latest(&self) -> Option<GenerateResponse> {
        let latest = self.latest_token()?;
        loop {
            match self.responses.try_recv() {
                Ok((token, response)) if token == latest => return Some(response),
                Ok((token, _)) => debug!("Discarding stale response for {:?}", token),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }
}

impl Drop for GenerationWorker {
    fn drop(&mut self) {
        // closing the request channel ends the worker loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Generation worker panicked");
            }
        }
    }
}

fn respond<C: PuzzleCache>(generator: &mut Generator<C>, request: &GenerateRequest) -> GenerateResponse {
    let params = request.params();
    match catch_unwind(AssertUnwindSafe(|| generator.generate(&params))) {
        Ok(Ok(generated)) => GenerateResponse::Success {
            grid: generated.puzzle,
            trace: generated.trace,
        },
        Ok(Err(e)) => {
            warn!("Generation failed: {}", e);
            GenerateResponse::Error {
                error: e.to_string(),
            }
        }
        Err(cause) => {
            let error = panic_message(cause.as_ref());
            error!("Generation panicked: {}", error);
            GenerateResponse::Error { error }
        }
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        "generation panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{GenerateRequest, GenerateResponse, GenerationWorker};
    use crate::generate::{GenerateParams, Generator, NoCache};
    use crate::puzzle::Difficulty;
    use crate::random::Seed;

    fn request(size: usize, seed: i64) -> GenerateRequest {
        GenerateRequest {
            size,
            number_count: 4,
            difficulty: Difficulty::Medium,
            seed: Some(Seed::Number(seed)),
        }
    }

    #[test]
    fn latest_response_wins() {
        let mut worker = GenerationWorker::spawn();
        worker.submit(request(4, 1)).unwrap();
        worker.submit(request(5, 2)).unwrap();
        let latest = worker.submit(request(3, 3)).unwrap();
        assert_eq!(Some(latest), worker.latest_token());
        let expected = Generator::with_cache(NoCache)
            .generate(&GenerateParams::new(3, 3, 4, Difficulty::Medium).with_seed(3))
            .unwrap();
        match worker.recv_latest() {
            Some(GenerateResponse::Success { grid, trace }) => {
                assert_eq!(expected.puzzle, grid);
                assert_eq!(expected.trace, trace);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn errors_become_responses() {
        let mut worker = GenerationWorker::spawn();
        let mut bad = request(2, 0);
        bad.number_count = 5;
        worker.submit(bad).unwrap();
        match worker.recv_latest() {
            Some(GenerateResponse::Error { error }) => assert!(error.contains("exceeds")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn oversized_request_is_rejected() {
        let mut worker = GenerationWorker::spawn();
        let mut huge = request(100, 0);
        huge.difficulty = Difficulty::Hard;
        worker.submit(huge).unwrap();
        match worker.recv_latest() {
            Some(GenerateResponse::Error { error }) => assert!(error.contains("largest supported size")),
            other => panic!("unexpected {:?}", other),
        }
        // the worker survives and answers the next request
        worker.submit(request(4, 1)).unwrap();
        assert!(matches!(worker.recv_latest(), Some(GenerateResponse::Success { .. })));
    }

    #[test]
    fn largest_hard_request() {
        let mut worker = GenerationWorker::spawn();
        let mut largest = request(64, 7);
        largest.difficulty = Difficulty::Hard;
        worker.submit(largest).unwrap();
        match worker.recv_latest() {
            Some(GenerateResponse::Success { trace, .. }) => assert_eq!(64 * 64, trace.len()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn nothing_submitted() {
        let worker = GenerationWorker::spawn();
        assert_eq!(None, worker.latest_token());
        assert_eq!(None, worker.try_recv_latest());
    }

    #[test]
    fn message_format() {
        let request: GenerateRequest =
            serde_json::from_str(r#"{"size":5,"numberCount":8,"difficulty":"HARD","seed":"2024-03-15"}"#)
                .unwrap();
        assert_eq!(Difficulty::Hard, request.difficulty);
        assert!(matches!(request.seed, Some(Seed::Date(_))));
        let response = GenerateResponse::Error {
            error: "boom".to_string(),
        };
        assert_eq!(
            r#"{"type":"error","error":"boom"}"#,
            serde_json::to_string(&response).unwrap()
        );
    }
}
