//! Built-in channel and subcategory seed data.
//!
//! The tables below are the source of truth for the curated configuration.
//! [`crate::store::VideoStore::seed`] upserts them on startup, so edits here
//! land in existing databases on the next boot.

/// A curated YouTube channel.
#[derive(Debug, Clone, Copy)]
pub struct ChannelSeed {
    pub name: &'static str,
    pub channel_id: &'static str,
    pub handle: &'static str,
}

/// One content rail inside a category, with its fetch strategy.
#[derive(Debug, Clone, Copy)]
pub struct SubcategorySeed {
    pub name: &'static str,
    pub strategy: &'static str,
    pub search_query: &'static str,
    pub order_param: Option<&'static str>,
    pub video_duration: Option<&'static str>,
    pub max_results: u32,
    /// Names from [`DEFAULT_CHANNELS`]; unknown names are skipped at seed time.
    pub channels: &'static [&'static str],
}

/// A top-level category and its rails.
#[derive(Debug, Clone, Copy)]
pub struct CategorySeed {
    pub category: &'static str,
    pub subcategories: &'static [SubcategorySeed],
}

const DEFAULT_MAX_RESULTS: u32 = 20;

const fn sub(
    name: &'static str,
    strategy: &'static str,
    search_query: &'static str,
    channels: &'static [&'static str],
) -> SubcategorySeed {
    SubcategorySeed {
        name,
        strategy,
        search_query,
        order_param: None,
        video_duration: None,
        max_results: DEFAULT_MAX_RESULTS,
        channels,
    }
}

const fn channel(
    name: &'static str,
    channel_id: &'static str,
    handle: &'static str,
) -> ChannelSeed {
    ChannelSeed {
        name,
        channel_id,
        handle,
    }
}

/// Master channel list. Channels are shared across categories, so each one
/// appears exactly once here.
pub const DEFAULT_CHANNELS: &[ChannelSeed] = &[
    // DSA
    channel("NeetCode", "UC_mYaQAE6-71g0JCo9cCMUA", "@NeetCodeio"),
    channel("freeCodeCamp.org", "UC8butISFwT-Wl7EV0hUK0BQ", "@freecodecamp"),
    channel("Abdul Bari", "UCZCFT11CWBi3MHNlGf019nw", "@abdul_bari"),
    channel("CS Dojo", "UCxX9wt5FWQUAAz4UrysqK9A", "@CSDojo"),
    channel("Back To Back SWE", "UCmJz2DV1a3yfgrR7GqRtUUA", "@BackToBackSWE"),
    channel("WilliamFiset", "UCD8-slMDTU3zddW_eXjhUjg", "@WilliamFiset-videos"),
    channel("Errichto", "UCdJt_D2i4i-y5WEi1sbs9gA", "@Errichto"),
    channel("AlgoEngine", "UCk-HsyV3K-g-46LD7H-i9bA", "@AlgoEngine"),
    channel("Gaurav Sen", "UCRPMAqdtSgd0IPEef7iMqVg", "@GauravSensei"),
    channel("mycodeschool", "UClEEsT7Dkdt2btmOFY1u_vA", "@mycodeschool"),
    channel("Tech With Tim", "UC4JXvGtOQzssDyYgemNl_-A", "@TechWithTim"),
    channel("Clément Mihailescu", "UCaO6VoaYJv4kS-TQO_M-N_g", "@ClementMihailescu"),
    channel("Nick White", "UC1fLEeYhtVLFaW4HD9lBhMw", "@NickWhite"),
    channel("Joma Tech", "UCV0qA-eDDICsRR9rPcnG7tw", "@JomaTech"),
    // System design
    channel("ByteByteGo", "UCZgt6AzoyjslHTC9dz0UoTw", "@ByteByteGo"),
    channel("Exponent", "UCM2M-B-1s0D-sdG3A0sC-UA", "@tryexponent"),
    channel("Jordan Has No Life", "UCn-3W4THeitQc8N_wS1-cMg", "@JordanHasNoLife"),
    channel("Hussein Nasser", "UC_ML5xP23TOWKzIMy_jA0EA", "@hnasr"),
    channel("CodeKarle", "UCptXsp_NGh_eKk-bA3-3AZA", "@codekarle"),
    channel("InfoQ", "UCkQX1_yj5HH0aH39qa3sOwg", "@InfoQ"),
    // AI & ML
    channel("Two Minute Papers", "UCbfYPyITQ-7l4upoX8nvctg", "@TwoMinutePapers"),
    channel("Andrej Karpathy", "UC_SSlF8s_pJ33gV2B2tM04Q", "@AndrejKarpathy"),
    channel(
        "StatQuest with Josh Starmer",
        "UCtYLUTtgS3k1Fg4y5tAhLbw",
        "@statquest",
    ),
    channel("Yannic Kilcher", "UCZHmQk67mSJgfCCTn7xBfew", "@YannicKilcher"),
    channel("Sentdex", "UCfzlCWGWYyIQ0aLC5w48gBQ", "@sentdex"),
    channel("Lex Fridman", "UCSHZKyawb77ixDdsGog4iWA", "@lexfridman"),
    channel("LangChain", "UCC-d1_n_Kzao-h_u-d_T_Yg", "@LangChain"),
    // Languages
    channel(
        "Programming with Mosh",
        "UCWv7vFStA_juaYSq-cKVXgQ",
        "@programmingwithmosh",
    ),
    channel("Corey Schafer", "UCO1cgjhGdkAQbckDgocLiwQ", "@coreyms"),
    channel("Let's Get Rusty", "UCpeX4D-ArTrsqOKAnA3Fhjg", "@LetsGetRusty"),
    channel("No Boilerplate", "UC2R2d-iSRv114d7c6bYwW2A", "@NoBoilerplate"),
    channel("Ryan Levick", "UCi39b_aZk-2cQGF0-p-d_XQ", "@ryanlevick"),
];

/// Category and rail configuration.
pub const DEFAULT_CATEGORIES: &[CategorySeed] = &[
    CategorySeed {
        category: "dsa",
        subcategories: &[
            sub(
                "Most Watched",
                "POPULARITY",
                "data structures OR algorithms tutorial",
                &[],
            ),
            sub(
                "Latest Uploads",
                "RECENCY_CURATED",
                "data structures OR algorithms",
                &[
                    "NeetCode",
                    "freeCodeCamp.org",
                    "Abdul Bari",
                    "CS Dojo",
                    "Back To Back SWE",
                    "WilliamFiset",
                    "Errichto",
                    "AlgoEngine",
                    "Gaurav Sen",
                    "mycodeschool",
                    "Tech With Tim",
                    "Clément Mihailescu",
                    "Nick White",
                    "Joma Tech",
                ],
            ),
            sub(
                "Quick Concepts (Under 20 mins)",
                "FORMAT_DURATION",
                "data structures OR algorithms",
                &[],
            ),
            sub(
                "Masterclasses",
                "FORMAT_KEYWORD",
                "(data structures OR algorithms) masterclass",
                &[],
            ),
            sub(
                "Arrays & Strings",
                "TOPIC_CURATED",
                "(arrays OR strings) AND (data structures OR algorithms)",
                &[
                    "NeetCode",
                    "freeCodeCamp.org",
                    "CS Dojo",
                    "Back To Back SWE",
                    "Gaurav Sen",
                    "mycodeschool",
                ],
            ),
            sub(
                "Linked Lists",
                "TOPIC_CURATED",
                "'linked lists' AND (data structures OR algorithms)",
                &["NeetCode", "freeCodeCamp.org", "CS Dojo", "mycodeschool"],
            ),
            sub(
                "Searching & Sorting",
                "TOPIC_CURATED",
                "(searching OR sorting) AND algorithms",
                &[
                    "NeetCode",
                    "freeCodeCamp.org",
                    "CS Dojo",
                    "mycodeschool",
                    "Abdul Bari",
                ],
            ),
            sub(
                "Trees & Graphs",
                "TOPIC_CURATED",
                "(trees OR graphs) AND (data structures OR algorithms)",
                &[
                    "NeetCode",
                    "freeCodeCamp.org",
                    "CS Dojo",
                    "Back To Back SWE",
                    "WilliamFiset",
                    "Abdul Bari",
                ],
            ),
            sub(
                "Heaps & Tries",
                "TOPIC_CURATED",
                "(heaps OR tries OR 'priority queue') AND (data structures OR algorithms)",
                &["NeetCode", "freeCodeCamp.org", "WilliamFiset", "Abdul Bari"],
            ),
            sub(
                "Dynamic Programming",
                "TOPIC_CURATED",
                "'dynamic programming' AND algorithms",
                &[
                    "NeetCode",
                    "freeCodeCamp.org",
                    "CS Dojo",
                    "Back To Back SWE",
                    "Errichto",
                ],
            ),
            sub(
                "Backtracking",
                "TOPIC_CURATED",
                "backtracking AND algorithms",
                &["NeetCode", "freeCodeCamp.org", "Back To Back SWE"],
            ),
        ],
    },
    CategorySeed {
        category: "system_design",
        subcategories: &[
            sub("Most Watched", "POPULARITY", "system design interview", &[]),
            sub(
                "Latest Uploads",
                "RECENCY_CURATED",
                "system design",
                &[
                    "ByteByteGo",
                    "Gaurav Sen",
                    "Exponent",
                    "Jordan Has No Life",
                    "Hussein Nasser",
                    "CodeKarle",
                    "InfoQ",
                ],
            ),
            sub(
                "Masterclasses & Deep Dives",
                "FORMAT_KEYWORD",
                "'system design' (masterclass OR 'deep dive' OR course)",
                &["ByteByteGo", "Gaurav Sen", "Hussein Nasser"],
            ),
            sub(
                "System Design Fundamentals",
                "TOPIC_CURATED",
                "system design fundamentals (scalability OR caching OR database OR 'load balancer')",
                &[
                    "ByteByteGo",
                    "Gaurav Sen",
                    "Exponent",
                    "Hussein Nasser",
                    "CodeKarle",
                ],
            ),
            sub(
                "Full Mock Interviews",
                "FORMAT_KEYWORD",
                "'system design mock interview'",
                &["Exponent", "Jordan Has No Life", "Gaurav Sen"],
            ),
        ],
    },
    CategorySeed {
        category: "ai_ml",
        subcategories: &[
            sub(
                "Most Watched",
                "POPULARITY",
                "machine learning introduction",
                &[],
            ),
            sub(
                "AI & ML Fundamentals",
                "TOPIC_CURATED",
                "machine learning fundamentals",
                &[
                    "StatQuest with Josh Starmer",
                    "Two Minute Papers",
                    "Sentdex",
                ],
            ),
            sub(
                "Large Language Models (LLMs)",
                "TOPIC_CURATED",
                "large language models explained OR LLM",
                &[
                    "Two Minute Papers",
                    "Andrej Karpathy",
                    "Yannic Kilcher",
                    "Lex Fridman",
                ],
            ),
            sub(
                "Prompt Engineering",
                "TOPIC_CURATED",
                "prompt engineering tutorial",
                &["Two Minute Papers", "freeCodeCamp.org", "Sentdex"],
            ),
            sub(
                "LangChain",
                "TOPIC_CURATED",
                "langchain tutorial",
                &["freeCodeCamp.org", "Sentdex", "Tech With Tim"],
            ),
            sub(
                "LangGraph",
                "TOPIC_CURATED",
                "langgraph tutorial",
                &["LangChain", "Sentdex"],
            ),
        ],
    },
    CategorySeed {
        category: "language_python",
        subcategories: &[
            sub(
                "Python - Most Watched",
                "POPULARITY",
                "python programming tutorial",
                &[],
            ),
            sub(
                "Python - Latest Uploads",
                "RECENCY_CURATED",
                "python",
                &[
                    "Corey Schafer",
                    "freeCodeCamp.org",
                    "Programming with Mosh",
                    "Tech With Tim",
                ],
            ),
            sub(
                "Python - Quick Concepts",
                "FORMAT_DURATION",
                "python tutorial",
                &[],
            ),
            sub(
                "Python - Masterclasses",
                "FORMAT_KEYWORD",
                "python 'full course' OR masterclass",
                &[],
            ),
        ],
    },
    CategorySeed {
        category: "language_rust",
        subcategories: &[
            sub(
                "Rust - Most Watched",
                "POPULARITY",
                "rust programming tutorial",
                &[],
            ),
            sub(
                "Rust - Latest Uploads",
                "RECENCY_CURATED",
                "rust",
                &[
                    "Let's Get Rusty",
                    "No Boilerplate",
                    "Ryan Levick",
                    "freeCodeCamp.org",
                ],
            ),
            sub(
                "Rust - Quick Concepts",
                "FORMAT_DURATION",
                "rust concepts",
                &[],
            ),
            sub(
                "Rust - Masterclasses",
                "FORMAT_KEYWORD",
                "rust 'full course' OR masterclass",
                &[],
            ),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_channel_names_are_unique() {
        let mut seen = HashSet::new();
        for ch in DEFAULT_CHANNELS {
            assert!(seen.insert(ch.name), "duplicate channel name: {}", ch.name);
        }
    }

    #[test]
    fn test_channel_ids_are_unique() {
        let mut seen = HashSet::new();
        for ch in DEFAULT_CHANNELS {
            assert!(
                seen.insert(ch.channel_id),
                "duplicate channel id: {}",
                ch.channel_id
            );
        }
    }

    #[test]
    fn test_curated_references_resolve() {
        let known: HashSet<&str> = DEFAULT_CHANNELS.iter().map(|c| c.name).collect();
        for cat in DEFAULT_CATEGORIES {
            for sub in cat.subcategories {
                for name in sub.channels {
                    assert!(
                        known.contains(name),
                        "{}/{} references unknown channel {name}",
                        cat.category,
                        sub.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_curated_strategies_have_channels() {
        for cat in DEFAULT_CATEGORIES {
            for sub in cat.subcategories {
                if sub.strategy == "RECENCY_CURATED" || sub.strategy == "TOPIC_CURATED" {
                    assert!(
                        !sub.channels.is_empty(),
                        "{}/{} has no curated channels",
                        cat.category,
                        sub.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_category_has_a_popularity_rail() {
        for cat in DEFAULT_CATEGORIES {
            assert!(
                cat.subcategories
                    .iter()
                    .any(|s| s.strategy == "POPULARITY"),
                "{} has no popularity rail",
                cat.category
            );
        }
    }
}
