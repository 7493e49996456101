mod ring;
mod slots;

pub use ring::FixedRing;
