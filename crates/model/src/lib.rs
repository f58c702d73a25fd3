pub use serde_with;

pub mod station;
pub mod trip;

/// Sample values rendered into `/schema?exampleData=true` responses.
pub trait ExampleData {
    fn example_data() -> Self;
}
