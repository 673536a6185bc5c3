//! Translation of Télérama program categories to the ETSI EN 300 468
//! content descriptor labels

use log::warn;

/// Outcome of a category lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CategoryLookup {
    /// Known category with a standard label
    Mapped(&'static str),
    /// Known category deliberately left without a standard label
    Suppressed,
    /// Category missing from the table
    Unknown,
}

/// Look a native category up without side effects
pub fn lookup(category: &str) -> CategoryLookup {
    let label = match category {
        "Ballet" | "Clips" | "Concert" => "Music / Ballet / Dance",
        "Débat" | "Talk show" => "Talk show",
        "Dessin animé" => "Cartoons / Puppets",
        "Divertissement" | "Téléréalité" | "Variétés" => "Variety show",
        "Documentaire" => "Documentary",
        // The feed truncates this one at times
        "Emission du bien-être" | "Emission du bien-êtr" | "Fitness" => "Fitness and health",
        "Feuilleton" => "Soap / Melodrama / Folkloric",
        "Feuilleton sentimental" => "Romance",
        "Film" | "Série" | "Téléfilm" => "Movie / Drama",
        "Interview" => "Discussion / Interview / Debate",
        "Jeu" | "Loterie" => "Game show / Quiz / Contest",
        "Jeunesse" => "Children's / Youth programmes",
        "Journal" => "News / Current affairs",
        "Magazine" => "Magazines / Reports / Documentary",
        "Météo" => "News / Weather report",
        "Opéra" => "Musical / Opera",
        "Politique" => "Social / Political issues / Economics",
        "Religion" => "Religion",
        "Spectacle" | "Théâtre" => "Performing arts",
        "Sport" | "Tiercé" => "Sports",
        "Voyance" => "Leisure hobbies",
        "Divers" | "Émission" | "Fin" => return CategoryLookup::Suppressed,
        _ => return CategoryLookup::Unknown,
    };
    CategoryLookup::Mapped(label)
}

/// Standard label for a native category, or "" when there is none.
///
/// Unknown categories are reported once on the log but never fail the record.
pub fn translate(category: &str) -> &'static str {
    match lookup(category) {
        CategoryLookup::Mapped(label) => label,
        CategoryLookup::Suppressed => "",
        CategoryLookup::Unknown => {
            warn!("Unmanaged category: {}", category);
            ""
        }
    }
}
