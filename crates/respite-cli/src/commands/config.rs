use clap::Subcommand;
use respite_core::{FileSettingsStore, Settings, SettingsStore};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a settings value
    Get {
        /// Dot-separated key (e.g. "breaks.frequency_secs")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Dot-separated key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings as JSON
    List,
    /// Reset settings to defaults
    Reset,
    /// Print the settings file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileSettingsStore::open_default()?;
    match action {
        ConfigAction::Get { key } => match store.get().get_path(&key) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("unknown key: {key}");
                std::process::exit(1);
            }
        },
        ConfigAction::Set { key, value } => {
            let mut settings = store.get();
            settings.set_path(&key, &value)?;
            store.set(&settings)?;
            println!("ok");
        }
        ConfigAction::List => {
            println!("{}", serde_json::to_string_pretty(&store.get())?);
        }
        ConfigAction::Reset => {
            store.set(&Settings::default())?;
            println!("settings reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", store.path().display());
        }
    }
    Ok(())
}
