// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::categories::{self, Taxonomy};
use crate::utils::pretty_table;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let taxonomy: Taxonomy = m.get_one::<String>("taxonomy").unwrap().parse()?;
    let rows: Vec<Vec<String>> = categories::all(taxonomy)
        .iter()
        .map(|c| {
            vec![
                c.title.to_string(),
                c.icon.to_string(),
                c.color.to_string(),
            ]
        })
        .collect();
    println!("{} categories:", taxonomy);
    println!("{}", pretty_table(&["Title", "Icon", "Color"], rows));
    Ok(())
}
