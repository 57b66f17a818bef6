mod batch;

pub use batch::BatchRunner;
