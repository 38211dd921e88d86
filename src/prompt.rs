use crate::models::FloodQuery;

/// System role sent ahead of the prompt by the chat-style backends.
pub const SYSTEM_PROMPT: &str = "You are a hydrology expert.";

/// Builds the step-by-step flood risk instruction for `query`.
pub fn build_prompt(query: &FloodQuery) -> String {
    format!(
        "\nYou are a hydrology expert. Analyze the following:\n\n\
         Elevation: {} meters\n\
         Rainfall: {} mm\n\n\
         Using step-by-step reasoning, assess the flood risk in this area.\n",
        query.elevation, query.rainfall
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_values_verbatim() {
        let prompt = build_prompt(&FloodQuery {
            elevation: 3.25,
            rainfall: 180.5,
        });
        assert!(prompt.contains("Elevation: 3.25 meters\n"));
        assert!(prompt.contains("Rainfall: 180.5 mm\n"));
        assert!(prompt.contains("step-by-step reasoning"));
    }

    #[test]
    fn is_deterministic() {
        let q = FloodQuery {
            elevation: -2.0,
            rainfall: 0.0,
        };
        assert_eq!(build_prompt(&q), build_prompt(&q));
        assert!(build_prompt(&q).contains("Elevation: -2 meters"));
    }

    #[test]
    fn layout() {
        let prompt = build_prompt(&FloodQuery {
            elevation: 10.0,
            rainfall: 250.0,
        });
        assert_eq!(
            prompt,
            "\nYou are a hydrology expert. Analyze the following:\n\n\
             Elevation: 10 meters\nRainfall: 250 mm\n\n\
             Using step-by-step reasoning, assess the flood risk in this area.\n"
        );
    }
}
