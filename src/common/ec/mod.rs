mod encoder;
mod galois;

pub(crate) use encoder::{ecc, interleave};
