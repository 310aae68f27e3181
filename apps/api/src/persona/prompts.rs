// All LLM prompt constants for the persona pipeline.
// Templates use `{placeholder}` markers filled via `str::replace` before sending.

/// System prompt for persona generation — enforces JSON-only output.
pub const PERSONA_SYSTEM: &str =
    "You are a cultural analyst generating playful, taste-based persona profiles. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Persona prompt template.
/// Replace: {language}, {movies}, {music}, {brands}, {gender},
///          {taste_signals}, {variation_seed}
pub const PERSONA_PROMPT_TEMPLATE: &str = r#"CRITICAL INSTRUCTION: You MUST respond ENTIRELY in {language}.
EVERY SINGLE TEXT FIELD must be in {language}, including:
- personaName
- description
- traits (all 3 items)
- insights.likelyInterests
- insights.likelyBehaviors
- therapySuggestion.summary
- therapySuggestion.recommendation
- therapySuggestion.dailyTip
- archetype.name
- archetype.description
- culturalDNAScore (region names as keys - MUST be in {language})

User preferences:
- Favorite Movies: {movies}
- Favorite Music: {music}
- Favorite Brands: {brands}
- Gender: {gender}
- Taste-graph cultural signals: {taste_signals}
- Variation seed: {variation_seed}

Return a JSON object with:
- personaName (string) - MUST be in {language}
- description (1-2 sentence string) - MUST be in {language}
- traits (list of 3 strings) - MUST be in {language}
- insights (object with:
    likelyInterests (string) - MUST be in {language},
    likelyBehaviors (string) - MUST be in {language}
)
- culturalTwin (string) - ONLY the famous person's name, no description or parentheses, can be in original language
- therapySuggestion (object with:
    summary (string) - MUST be in {language},
    recommendation (string) - MUST be in {language},
    resources (list of 1-2 URLs or names),
    dailyTip (string) - MUST be in {language}
)
- culturalDNAScore (object with region names as keys and % scores as values, max 4 regions) - REGION NAMES MUST be in {language}
- archetype (object with name and 1-sentence description - BOTH MUST be in {language})

FINAL REMINDER: EVERYTHING must be in {language} except for the culturalTwin which should be ONLY the person's name (no description, no parentheses) and can remain in its original language.
Be creative and vary the result slightly each time using the variation seed.
Only respond with valid JSON."#;

/// System prompt for cultural-map insights — enforces JSON-only output.
pub const CULTURAL_MAP_SYSTEM: &str =
    "You are a cultural analyst writing short, vivid country insights. \
    You MUST respond with valid JSON only - a JSON array of objects. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Cultural-map prompt template. Replace: {language}, {countries}
pub const CULTURAL_MAP_PROMPT_TEMPLATE: &str = r#"CRITICAL INSTRUCTION: You MUST respond ENTIRELY in {language}.
ALL cultural insights and recommendations must be in {language}.

For each of the following countries, return a JSON array of objects.
Each object should include:
- country (string) - country name can be in original language
- culturalInsight (1-2 sentences about the culture) - MUST be in {language}
- recommendation (a film, artist, or brand that represents it) - MUST be in {language}

Countries: {countries}

FINAL REMINDER: All descriptions and recommendations must be in {language}.
Only respond with a valid JSON list."#;
