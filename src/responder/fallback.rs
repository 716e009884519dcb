//! Rule-based responder, the last tier of the chat pipeline. Cannot fail:
//! every input maps to a canned topical reply or a generic tip.

/// Topic bucket: exact keywords first, then fuzzy scoring against `name`.
pub struct Bucket {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

pub const BUCKETS: &[Bucket] = &[
    Bucket {
        name: "greeting",
        keywords: &["hello", "hi", "hey", "good morning", "good afternoon"],
        reply: "Hello! I'm your sustainability assistant. Ask me anything about carbon \
                footprints, greener transport, or saving energy at home.",
    },
    Bucket {
        name: "farewell",
        keywords: &["bye", "goodbye", "farewell", "see you"],
        reply: "Goodbye! Remember that small everyday choices add up to a big impact \
                on the planet.",
    },
    Bucket {
        name: "help",
        keywords: &["help", "what can you do", "how do you work"],
        reply: "I can estimate your personal carbon footprint, analyze a website's \
                emissions, and answer sustainability questions. Try asking about your \
                diet, transport, or electricity use.",
    },
    Bucket {
        name: "carbon",
        keywords: &["carbon", "footprint", "emission", "co2"],
        reply: "A carbon footprint is the total greenhouse gas emitted by your \
                activities, measured in kg CO2e. Driving less, eating more plant-based \
                meals, and cutting electricity use are the fastest ways to shrink it.",
    },
    Bucket {
        name: "sustainability",
        keywords: &["sustainability", "sustainable", "eco", "green", "environment"],
        reply: "Sustainable living means meeting your needs without exhausting the \
                planet's resources. Start small: reduce, reuse, recycle, and favour \
                low-energy options.",
    },
];

pub const GENERIC_REPLY: &str =
    "I'm having trouble connecting to my knowledge base right now. Here's a quick tip \
     in the meantime: switching to LED bulbs can cut your lighting energy use by up to 85%.";

/// Minimum fuzzy score (0-100) for a topical reply.
pub const DEFAULT_THRESHOLD: f64 = 70.0;

/// Looser threshold used when the local model timed out rather than being
/// down: prefer a topical answer over the generic one.
pub const TIMEOUT_THRESHOLD: f64 = 62.0;

/// Picks a canned reply for `message`: exact keyword containment first, then
/// the best Jaro-Winkler match against bucket names, else the generic tip.
pub fn respond(message: &str, threshold: f64) -> &'static str {
    let query = message.trim().to_lowercase();

    for bucket in BUCKETS {
        if bucket.keywords.iter().any(|keyword| query.contains(keyword)) {
            return bucket.reply;
        }
    }

    let best = BUCKETS
        .iter()
        .map(|bucket| (bucket, strsim::jaro_winkler(&query, bucket.name) * 100.0))
        .max_by(|(_, a), (_, b)| a.total_cmp(b));

    match best {
        Some((bucket, score)) if score >= threshold => {
            tracing::debug!("fuzzy fallback matched `{}` at {score:.1}", bucket.name);
            bucket.reply
        }
        _ => GENERIC_REPLY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_wins() {
        let reply = respond("How big is my carbon footprint?", DEFAULT_THRESHOLD);
        assert_eq!(reply, BUCKETS[3].reply);
    }

    #[test]
    fn greeting_keywords() {
        assert_eq!(respond("hello there", DEFAULT_THRESHOLD), BUCKETS[0].reply);
        assert_eq!(respond("Good morning!", DEFAULT_THRESHOLD), BUCKETS[0].reply);
    }

    #[test]
    fn case_insensitive_keywords() {
        assert_eq!(respond("CARBON emissions?", DEFAULT_THRESHOLD), BUCKETS[3].reply);
    }

    #[test]
    fn fuzzy_match_catches_typos() {
        // No exact keyword, but close to the `farewell` bucket name.
        assert_eq!(respond("farewel", DEFAULT_THRESHOLD), BUCKETS[1].reply);
    }

    #[test]
    fn gibberish_gets_generic_reply() {
        assert_eq!(respond("qqqq zzzz xxxx", DEFAULT_THRESHOLD), GENERIC_REPLY);
    }

    #[test]
    fn never_empty() {
        for message in ["", "   ", "?!", "qwertyuiop"] {
            assert!(!respond(message, DEFAULT_THRESHOLD).is_empty());
        }
    }
}
