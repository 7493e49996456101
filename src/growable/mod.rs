mod ring;

pub use ring::GrowableRing;
