// src/params.rs

pub const USER_AGENT: &str = concat!("gw_scrape/", env!("CARGO_PKG_VERSION"));

pub const CN_WIKI_BASE: &str = "https://wiki.biligame.com";
pub const CN_CHARACTER_LISTING_URL: &str = "https://wiki.biligame.com/ys/角色筛选";

pub const EN_WIKI_BASE: &str = "https://genshin-impact.fandom.com";
pub const EN_CHARACTER_LISTING_URL: &str = "https://genshin-impact.fandom.com/wiki/Characters";

pub const ABYSS_SCHEDULE_URL: &str = "https://wiki.biligame.com/ys/渊月螺旋";

// Row-header marker tokens on the abyss schedule tables.
pub const ENEMY_LEVEL_MARKER: &str = "怪物等级";
pub const FIRST_HALF_MARKER: &str = "上半";
pub const SECOND_HALF_MARKER: &str = "下半";
pub const ENEMY_LEVEL_PREFIX: &str = "Lv.";

// Wikitable row headers on CN character pages.
pub const TITLE_ROW_MARKER: &str = "称号";
pub const VISION_ROW_MARKER: &str = "元素属性";

// Heading of the resistance table on CN enemy pages.
pub const RESISTANCE_MARKER: &str = "抗性";
