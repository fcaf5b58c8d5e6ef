/// A console command. Each one owns its runtime, so `main` stays synchronous.
pub trait CallableTrait {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>>;
}
