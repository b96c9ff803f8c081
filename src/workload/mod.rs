/*!
 * Workload Module
 * Producing process records: text input and synthetic generation
 */

pub mod generator;
pub mod parser;

pub use generator::{generate_static, BurstDistribution, IoProfile, PriorityDistribution, RandomWorkload};
pub use parser::{load_workload, parse_workload, MalformedLine, ParseReport};
