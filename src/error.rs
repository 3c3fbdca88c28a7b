use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("embedded font could not be parsed")]
    Font,
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error(transparent)]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Surface(#[from] pixels::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
