use std::collections::HashSet;

/// Strips markup from a user-supplied name before it is stored.
///
/// Names are shown to every visitor of the leaderboard, so they go through
/// ammonia with an empty tag whitelist: tags are dropped and their text kept,
/// `<script>` and `<style>` are dropped together with their content.
pub fn clean_text(input: &str) -> String {
    ammonia::Builder::default()
        .tags(HashSet::new())
        .clean(input)
        .to_string()
}
