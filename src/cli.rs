use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Recipe ideas from the ingredients you already have", long_about = None)]
pub struct Cli {
    /// Favorites file (defaults to $PANTRY_CHEF_FAVORITES or ./favorites.json)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask the model for recipes using the given ingredients
    Suggest {
        /// Ingredients; each argument may itself be comma or newline separated
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Manage saved recipes
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    /// Save a recipe given as JSON
    Save {
        #[arg(long)]
        owner: String,
        /// Recipe object, e.g. '{"title":"Omelette","steps":["Whisk","Fry"]}'
        #[arg(long)]
        recipe: String,
    },
    /// List an owner's saved recipes
    List {
        #[arg(long)]
        owner: String,
    },
    /// Remove a saved recipe by id
    Remove {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        id: u64,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
