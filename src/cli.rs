use clap::{Args, Parser, Subcommand};
use domain::{PriceFilter, PropertyDraft, PropertyType, TypeFilter};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "listr", version)]
#[command(about = "Manage property listings on a hosted Supabase project", long_about = None)]
pub struct Cli {
    /// Load environment from this file instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in agent
    Whoami,

    /// List properties, newest first
    #[command(alias = "ls")]
    List {
        /// Match against title or location
        #[arg(short, long, default_value = "")]
        search: String,

        /// all, Apartment, Villa or Plot
        #[arg(short = 't', long = "type", default_value = "all")]
        type_filter: TypeFilter,

        /// all, low, mid or high
        #[arg(short, long, default_value = "all")]
        price: PriceFilter,
    },

    /// Add a property
    #[command(alias = "new")]
    Add(PropertyArgs),

    /// Edit a property; omitted fields keep their stored values
    Edit {
        id: Uuid,

        #[command(flatten)]
        fields: PropertyArgs,
    },

    /// Delete a property
    #[command(alias = "rm")]
    Delete { id: Uuid },
}

/// Form fields as typed. Required ones are checked when the draft is submitted.
#[derive(Args, Debug, Default, Clone)]
pub struct PropertyArgs {
    #[arg(long)]
    pub property_id: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short = 't', long = "type")]
    pub property_type: Option<PropertyType>,

    #[arg(long)]
    pub location: Option<String>,

    /// Square footage
    #[arg(long)]
    pub area: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    /// Leave empty to clear
    #[arg(long)]
    pub bedrooms: Option<String>,

    /// Comma separated, e.g. "Pool, Gym"
    #[arg(long)]
    pub amenities: Option<String>,

    #[arg(long)]
    pub owner_contact: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

impl PropertyArgs {
    /// Overwrite the draft with every field given on the command line.
    pub fn apply_to(self, draft: &mut PropertyDraft) {
        let assign = |slot: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *slot = value;
            }
        };

        assign(&mut draft.property_id, self.property_id);
        assign(&mut draft.title, self.title);
        assign(&mut draft.location, self.location);
        assign(&mut draft.area, self.area);
        assign(&mut draft.price, self.price);
        assign(&mut draft.bedrooms, self.bedrooms);
        assign(&mut draft.amenities, self.amenities);
        assign(&mut draft.owner_contact, self.owner_contact);
        assign(&mut draft.description, self.description);
        if let Some(property_type) = self.property_type {
            draft.property_type = property_type;
        }
    }

    pub fn into_draft(self) -> PropertyDraft {
        let mut draft = PropertyDraft::default();
        self.apply_to(&mut draft);
        draft
    }
}
