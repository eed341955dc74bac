pub(crate) mod ffmpeg;
pub(crate) mod process;
pub(crate) mod settle;
