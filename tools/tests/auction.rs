mod common;

use std::io::Cursor;

use common::BruteForce;
use satreduce::solvers::{SolveMaxsat, SolverError};
use satreduce_tools::encodings::auction::Auction;

fn winner_determination(input: &str, min_win_bids: bool) -> (isize, Vec<usize>, bool) {
    let auction = Auction::from_file(Cursor::new(input)).unwrap();
    let encoding = auction.winner_determination(min_win_bids);
    let solution = BruteForce.solve(encoding.formula()).unwrap();
    let result = encoding.decode(solution.cost, &solution.assignment);
    let indices = result.winners.iter().map(|bid| bid.index).collect();
    (result.benefit, indices, result.valid)
}

#[test]
fn auctioneer_bid_beats_higher_conflict_free_revenue() {
    // without the min-win constraint B's bid would win on price alone
    let input = "a A\ng g1\nA g1 10\nB g1 15\n";
    let (benefit, winners, valid) = winner_determination(input, true);
    assert_eq!(winners, vec![1]);
    assert_eq!(benefit, 10);
    assert!(valid);
}

#[test]
fn higher_bid_wins_without_min_win() {
    let input = "a A\ng g1\nA g1 10\nB g1 15\n";
    let (benefit, winners, valid) = winner_determination(input, false);
    assert_eq!(winners, vec![2]);
    assert_eq!(benefit, 15);
    assert!(valid);
}

#[test]
fn disjoint_goods_all_win() {
    let input = "a A B\ng g1 g2\nA g1 7\nB g2 4\n";
    let (benefit, winners, valid) = winner_determination(input, true);
    assert_eq!(winners, vec![1, 2]);
    assert_eq!(benefit, 11);
    assert!(valid);
}

#[test]
fn conflicting_min_win_is_infeasible() {
    // both auctioneers bid on the same good, so they can never both win
    let input = "a A B\nA g1 10\nB g1 5\n";
    let auction = Auction::from_file(Cursor::new(input)).unwrap();
    let encoding = auction.winner_determination(true);
    let err = BruteForce.solve(encoding.formula()).unwrap_err();
    assert_eq!(err.downcast::<SolverError>().unwrap(), SolverError::Infeasible);
}

#[test]
fn auctioneer_without_bids_is_infeasible() {
    let input = "a A B\nA g1 10\n";
    let auction = Auction::from_file(Cursor::new(input)).unwrap();
    let encoding = auction.winner_determination(true);
    let err = BruteForce.solve(encoding.formula()).unwrap_err();
    assert_eq!(err.downcast::<SolverError>().unwrap(), SolverError::Infeasible);
}

#[test]
fn winners_are_conflict_free_and_benefit_adds_up() {
    let input = "a A B\n\
                 A g1 g2 8\n\
                 A g3 3\n\
                 B g2 g3 6\n\
                 B g4 2\n\
                 C g1 g4 9\n";
    let auction = Auction::from_file(Cursor::new(input)).unwrap();
    let encoding = auction.winner_determination(false);
    let solution = BruteForce.solve(encoding.formula()).unwrap();
    let result = encoding.decode(solution.cost, &solution.assignment);
    assert!(result.valid);
    // every good is sold at most once
    for good in ["g1", "g2", "g3", "g4"] {
        let sold = result
            .winners
            .iter()
            .filter(|bid| bid.goods.iter().any(|g| g == good))
            .count();
        assert!(sold <= 1, "good {good} sold {sold} times");
    }
    // the reported benefit is the winners' summed price
    let revenue: usize = result.winners.iter().map(|bid| bid.price).sum();
    assert_eq!(result.benefit, revenue as isize);
}
