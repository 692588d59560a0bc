use clap::Subcommand;
use respite_core::{Attachment, BreakMessage, FileSettingsStore, SettingsStore};

#[derive(Subcommand)]
pub enum MessagesAction {
    /// List the message pool
    List,
    /// Add a message to the pool
    Add {
        text: String,
        /// Per-message break length override in seconds
        #[arg(long)]
        duration: Option<u64>,
        /// Attachment path shown alongside the message (repeatable)
        #[arg(long)]
        attachment: Vec<String>,
    },
    /// Remove a message by index
    Remove { index: usize },
}

pub fn run(action: MessagesAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileSettingsStore::open_default()?;
    match action {
        MessagesAction::List => {
            let pool = store.get().messages.pool;
            if pool.is_empty() {
                println!("(empty pool; the built-in fallback message is used)");
            }
            for (i, message) in pool.iter().enumerate() {
                match message.duration_secs {
                    Some(secs) => println!("{i}: {} [{secs}s]", message.text),
                    None => println!("{i}: {}", message.text),
                }
            }
        }
        MessagesAction::Add {
            text,
            duration,
            attachment,
        } => {
            let mut settings = store.get();
            settings.messages.pool.push(BreakMessage {
                text,
                attachments: attachment
                    .into_iter()
                    .map(|path| Attachment { path })
                    .collect(),
                duration_secs: duration,
            });
            store.set(&settings)?;
            println!("ok ({} messages)", settings.messages.pool.len());
        }
        MessagesAction::Remove { index } => {
            let mut settings = store.get();
            if index >= settings.messages.pool.len() {
                eprintln!(
                    "index {index} out of range ({} messages)",
                    settings.messages.pool.len()
                );
                std::process::exit(1);
            }
            let removed = settings.messages.pool.remove(index);
            store.set(&settings)?;
            println!("removed: {}", removed.text);
        }
    }
    Ok(())
}
