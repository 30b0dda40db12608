// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneta::categories::{self, Taxonomy, UNKNOWN};

#[test]
fn known_titles_resolve_to_their_icon() {
    let item = categories::lookup(Taxonomy::Expense, "Еда");
    assert_eq!(item.icon, "fork.knife");
    let item = categories::lookup(Taxonomy::Income, "Работа");
    assert_eq!(item.icon, "briefcase.fill");
    let item = categories::lookup(Taxonomy::BudgetAccount, "Наличка");
    assert_eq!(item.icon, "banknote");
}

#[test]
fn unknown_titles_fall_back_to_the_neutral_item() {
    assert_eq!(categories::lookup(Taxonomy::Expense, "Казино"), UNKNOWN);
    // Titles do not leak across taxonomies.
    assert_eq!(categories::lookup(Taxonomy::Credit, "Еда"), UNKNOWN);
}

#[test]
fn each_taxonomy_matches_the_fixed_catalog() {
    assert_eq!(categories::all(Taxonomy::Income).len(), 4);
    assert_eq!(categories::all(Taxonomy::Expense).len(), 6);
    assert_eq!(categories::all(Taxonomy::Goal).len(), 6);
    assert_eq!(categories::all(Taxonomy::Credit).len(), 4);
    assert_eq!(categories::all(Taxonomy::BudgetAccount).len(), 3);
}

#[test]
fn taxonomy_parses_from_cli_names() {
    assert_eq!("expense".parse::<Taxonomy>().unwrap(), Taxonomy::Expense);
    assert_eq!("account".parse::<Taxonomy>().unwrap(), Taxonomy::BudgetAccount);
    assert!("food".parse::<Taxonomy>().is_err());
}
