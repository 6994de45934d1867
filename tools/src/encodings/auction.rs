//! # Combinatorial Auction Winner Determination
//!
//! - Data types
//! - Input parser
//! - MaxSAT encoding and solution decoding
//!
//! Winner determination selects a conflict-free subset of bids maximizing
//! total price. The reduction gives every bid one decision variable with a
//! unit soft clause weighted by its price, so the solver maximizes selected
//! revenue by minimizing the cost of unselected bids.

use std::io;

use itertools::Itertools;
use satreduce::{
    clause,
    instances::Wcnf,
    types::{Assignment, Clause, RsHashMap, TernaryVal, Var},
};

/// One bid in a combinatorial auction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bid {
    /// Stable 1-based id matching the bid's declaration order. This is the
    /// only link between a decision variable and its bid, so it is assigned
    /// at parse time and never re-derived.
    pub index: usize,
    /// The bidding agent
    pub agent: String,
    /// The goods the bid claims
    pub goods: Vec<String>,
    /// The offered price
    pub price: usize,
}

/// A combinatorial auction instance
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Auction {
    auctioneers: Vec<String>,
    bids: Vec<Bid>,
}

impl Auction {
    /// Parses an auction description
    ///
    /// Lines starting with `a` list auctioneer identifiers, lines starting
    /// with `g` declare goods (ignored, the bids carry all information the
    /// reduction needs), every other non-empty line is a bid of the form
    /// `<agent> <good>... <price>`. Blank lines are skipped.
    pub fn from_file(reader: impl io::BufRead) -> anyhow::Result<Self> {
        parsing::parse_auction(reader)
    }

    /// Gets the declared auctioneers in declaration order
    pub fn auctioneers(&self) -> &[String] {
        &self.auctioneers
    }

    /// Gets the bids in declaration order
    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    /// Builds the winner-determination formula
    ///
    /// With `min_win_bids`, every auctioneer must win at least one of its own
    /// bids; an auctioneer without any bid makes the formula infeasible
    /// through an empty hard clause.
    pub fn winner_determination(&self, min_win_bids: bool) -> WinnerEncoding {
        let mut formula = Wcnf::new();
        let mut bid_vars = Vec::with_capacity(self.bids.len());
        let mut good_vars: RsHashMap<&str, Vec<Var>> = RsHashMap::default();
        for bid in &self.bids {
            let var = formula.new_var();
            formula.add_soft(bid.price, clause![var.pos_lit()]);
            for good in &bid.goods {
                let vars = good_vars.entry(good.as_str()).or_default();
                // a good listed twice in one bid must not exclude the bid
                // against itself
                if vars.last() != Some(&var) {
                    vars.push(var);
                }
            }
            bid_vars.push(var);
        }
        // At most one bid claiming a shared good may win. The variables per
        // good are in allocation order, so every unordered pair is emitted
        // exactly once and no duplicate check is needed.
        for vars in good_vars.values() {
            for (v1, v2) in vars.iter().tuple_combinations() {
                formula.add_hard(clause![v1.neg_lit(), v2.neg_lit()]);
            }
        }
        if min_win_bids {
            for auctioneer in &self.auctioneers {
                let own_bids: Clause = self
                    .bids
                    .iter()
                    .zip(&bid_vars)
                    .filter(|(bid, _)| &bid.agent == auctioneer)
                    .map(|(_, var)| var.pos_lit())
                    .collect();
                formula.add_hard(own_bids);
            }
        }
        WinnerEncoding {
            auction: self,
            formula,
            bid_vars,
        }
    }
}

/// A winner-determination formula together with its bid-variable map
#[derive(Debug)]
pub struct WinnerEncoding<'auct> {
    auction: &'auct Auction,
    formula: Wcnf,
    bid_vars: Vec<Var>,
}

impl<'auct> WinnerEncoding<'auct> {
    /// Gets the formula to pass to a solver
    pub fn formula(&self) -> &Wcnf {
        &self.formula
    }

    /// Decodes a solver answer into winning bids and benefit
    ///
    /// Decoding is a pure function of the solver answer; the winning bids are
    /// found by the positional correspondence between bid variables and bids.
    pub fn decode(&self, cost: usize, assignment: &Assignment) -> WinnerDetermination<'auct> {
        let sum_soft = self.formula.sum_soft_weights();
        let benefit = sum_soft as isize - cost as isize;
        let winners = self
            .bid_vars
            .iter()
            .zip(self.auction.bids())
            .filter(|(&var, _)| assignment.var_value(var) == TernaryVal::True)
            .map(|(_, bid)| bid)
            .collect();
        WinnerDetermination {
            benefit,
            winners,
            valid: benefit >= 0 && benefit <= sum_soft as isize,
        }
    }
}

/// A decoded winner-determination answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerDetermination<'auct> {
    /// Total price of the winning bids, computed as the soft weight sum
    /// minus the optimal cost
    pub benefit: isize,
    /// The winning bids, in declaration order
    pub winners: Vec<&'auct Bid>,
    /// Whether the answer passed the post-solve consistency check against
    /// the soft weight sum
    pub valid: bool,
}

mod parsing {
    use std::io;

    use anyhow::Context;

    pub fn parse_auction(mut reader: impl io::BufRead) -> anyhow::Result<super::Auction> {
        let mut auction = super::Auction::default();
        let mut buf = String::new();
        let mut line_no = 0;
        while reader.read_line(&mut buf)? > 0 {
            line_no += 1;
            parse_line(&buf, &mut auction)
                .with_context(|| format!("failed to parse line {line_no} '{}'", buf.trim_end()))?;
            buf.clear();
        }
        Ok(auction)
    }

    fn parse_line(line: &str, auction: &mut super::Auction) -> anyhow::Result<()> {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return Ok(());
        };
        match first {
            "a" => auction.auctioneers.extend(tokens.map(String::from)),
            "g" => (),
            agent => {
                let mut goods: Vec<String> = tokens.map(String::from).collect();
                let price = goods.pop().context("bid line has no price")?;
                let price: usize = price
                    .parse()
                    .with_context(|| format!("bid price '{price}' is not an integer"))?;
                anyhow::ensure!(price > 0, "bid price must be positive");
                anyhow::ensure!(!goods.is_empty(), "bid claims no goods");
                auction.bids.push(super::Bid {
                    index: auction.bids.len() + 1,
                    agent: String::from(agent),
                    goods,
                    price,
                });
            }
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use std::io::Cursor;

        #[test]
        fn auction_lines() {
            let data = "a A B\n\ng g1 g2 g3\nA g1 g2 10\n\nB g3 5\n";
            let auction = super::parse_auction(Cursor::new(data)).unwrap();
            assert_eq!(auction.auctioneers, vec!["A", "B"]);
            assert_eq!(auction.bids.len(), 2);
            assert_eq!(auction.bids[0].index, 1);
            assert_eq!(auction.bids[0].agent, "A");
            assert_eq!(auction.bids[0].goods, vec!["g1", "g2"]);
            assert_eq!(auction.bids[0].price, 10);
            assert_eq!(auction.bids[1].index, 2);
            assert_eq!(auction.bids[1].goods, vec!["g3"]);
        }

        #[test]
        fn bad_price() {
            assert!(super::parse_auction(Cursor::new("A g1 ten\n")).is_err());
        }

        #[test]
        fn bid_without_goods() {
            assert!(super::parse_auction(Cursor::new("A 10\n")).is_err());
        }
    }
}
