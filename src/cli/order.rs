//! Order command implementation

use anyhow::Result;
use clap::Args;

use crate::order::sort_chunks;

/// Sort chunk names into injection order
#[derive(Args, Debug)]
pub struct OrderCommand {
    /// Chunk names
    #[arg(required = true)]
    pub chunks: Vec<String>,
}

impl OrderCommand {
    pub fn execute(&self) -> Result<()> {
        let mut chunks = self.chunks.clone();
        sort_chunks(&mut chunks);

        for chunk in chunks {
            println!("{}", chunk);
        }

        Ok(())
    }
}
