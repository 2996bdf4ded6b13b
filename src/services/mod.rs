pub mod batch_remediator;
pub mod mutation_coalescer;
