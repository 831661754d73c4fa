use std::fmt;

use rand::Rng;
use serde::Serialize;

/// Broad domain of a topic. Disclosed to the player when a game starts.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Celebrity,
    Animal,
    FoodAndDrink,
    Place,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Celebrity,
        Category::Animal,
        Category::FoodAndDrink,
        Category::Place,
    ];

    /// Player-facing label, also used verbatim in prompts.
    pub fn label(self) -> &'static str {
        match self {
            Category::Celebrity => "実在の有名人（現代または歴史上の人物）",
            Category::Animal => "動物（実在の生物）",
            Category::FoodAndDrink => "食べ物や飲み物",
            Category::Place => "場所（国、都市、建造物など）",
        }
    }

    /// Picks a category uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Category {
        Category::ALL[rng.random_range(0..Category::ALL.len())]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
