//! Broadcast Gateway implementations.

mod channel_hub;

pub use channel_hub::ChannelHub;
