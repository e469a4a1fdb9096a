//! Property-based tests for filtering and the detail-view toggle.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;

use cmvp_tui::model::Module;
use cmvp_tui::tui::{substring_filter, App, Event};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

proptest! {
    /// The filtered result is exactly the set of keys whose lowercase form
    /// contains the lowercase query, in the original order.
    #[test]
    fn filter_is_exact_containment(
        keys in prop::collection::vec("[a-zA-Z0-9 /-]{0,30}", 0..40),
        query in "[a-zA-Z0-9 ]{0,8}",
    ) {
        let result = substring_filter(&query, &keys);

        let expected: Vec<usize> = keys
            .iter()
            .enumerate()
            .filter(|(_, k)| k.to_lowercase().contains(&query.to_lowercase()))
            .map(|(i, _)| i)
            .collect();

        prop_assert_eq!(result, expected);
    }

    /// An empty query keeps every key.
    #[test]
    fn empty_query_is_identity(
        keys in prop::collection::vec("[a-zA-Z0-9 ]{0,30}", 0..40),
    ) {
        let all: Vec<usize> = (0..keys.len()).collect();
        prop_assert_eq!(substring_filter("", &keys), all);
    }

    /// Matching is case-insensitive: the query matched against uppercased
    /// keys yields the same indices as against the originals.
    #[test]
    fn filter_ignores_case(
        keys in prop::collection::vec("[a-zA-Z]{1,20}", 1..20),
        query in "[a-zA-Z]{1,5}",
    ) {
        let upper: Vec<String> = keys.iter().map(|k| k.to_uppercase()).collect();
        prop_assert_eq!(
            substring_filter(&query, &keys),
            substring_filter(&query, &upper)
        );
    }

    /// Two consecutive toggle inputs always restore the expanded-algorithms
    /// flag, whatever the selected record looks like.
    #[test]
    fn toggle_pair_is_identity(
        name in "[a-zA-Z0-9 ]{1,20}",
        cert in "[0-9]{0,6}",
        detailed in prop::collection::vec("[a-zA-Z0-9 #().-]{0,40}", 0..5),
    ) {
        let module = Module {
            module_name: name,
            certificate_number: cert,
            algorithms_detailed: detailed,
            ..Module::default()
        };

        let mut app = App::new();
        app.update(Event::ModulesLoaded(vec![module]));
        app.update(key(KeyCode::Enter));

        let before = app.show_algo_details();
        app.update(key(KeyCode::Char('d')));
        app.update(key(KeyCode::Char('d')));
        prop_assert_eq!(app.show_algo_details(), before);
    }
}
