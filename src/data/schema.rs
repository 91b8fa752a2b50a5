//! Column names of the three input tables.
//!
//! Names are matched exactly (case and spelling) against the file headers.

/// Olympic medal table: one row per team.
pub mod medals {
    pub const TABLE: &str = "medal table";

    pub const TEAM: &str = "TEAM";
    pub const GOLD: &str = "GOLD";
    pub const SILVER: &str = "SILVER";
    pub const BRONZE: &str = "BRONZE";
    pub const TOTAL: &str = "TOTAL";

    pub const GOLD_PCT: &str = "Gold %";
    pub const SILVER_PCT: &str = "Silver %";
    pub const BRONZE_PCT: &str = "Bronze %";

    pub const REQUIRED: [&str; 5] = [TEAM, GOLD, SILVER, BRONZE, TOTAL];

    /// (source column, derived percentage column)
    pub const SHARES: [(&str, &str); 3] =
        [(GOLD, GOLD_PCT), (SILVER, SILVER_PCT), (BRONZE, BRONZE_PCT)];
}

/// Per-competition results: one row per (competition, country).
pub mod competitions {
    pub const TABLE: &str = "competition table";

    pub const COMPETITION: &str = "Competitions";
    pub const NOC: &str = "NOC";
    pub const RANK: &str = "Rank";
    pub const GOLD: &str = "Gold";
    pub const SILVER: &str = "Silver";
    pub const BRONZE: &str = "Bronze";
    pub const TOTAL: &str = "Total";

    pub const REQUIRED: [&str; 7] = [COMPETITION, NOC, RANK, GOLD, SILVER, BRONZE, TOTAL];
}

/// Historical observations: one row per (country, year, competition).
pub mod historical {
    pub const TABLE: &str = "historical table";

    pub const COUNTRY: &str = "Country";
    pub const YEAR: &str = "Year";
    pub const COMPETITION: &str = "Competition";
    pub const GOLD: &str = "Gold";
    pub const SILVER: &str = "Silver";
    pub const BRONZE: &str = "Bronze";
    pub const TOTAL: &str = "Total Medals";

    pub const REQUIRED: [&str; 7] = [COUNTRY, YEAR, COMPETITION, GOLD, SILVER, BRONZE, TOTAL];
}
