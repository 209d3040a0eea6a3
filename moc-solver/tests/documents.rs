use moc_solver::io::Auction;

const SINGLE_PAIR: &str = r#"{
    "generators": [
        [
            {"price": 10.0, "quantity": 50.0},
            {"price": 20.0, "quantity": 50.0},
            {"price": 30.0, "quantity": 50.0}
        ]
    ],
    "consumers": [
        [
            {"price": 35.0, "quantity": 40.0},
            {"price": 25.0, "quantity": 40.0},
            {"price": 15.0, "quantity": 40.0}
        ]
    ]
}"#;

#[test]
fn solve_reports_the_equilibrium_settlement() {
    let auction: Auction = serde_json::from_str(SINGLE_PAIR).unwrap();
    let outcome = auction.solve().unwrap();

    assert_eq!(outcome.equilibrium.price, 20.0);
    assert_eq!(outcome.equilibrium.quantity, 80.0);

    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["welfare"]["generators"][0]["surplus"], 500.0);
    assert_eq!(value["welfare"]["consumers"][0]["surplus"], 800.0);
}

#[test]
fn evaluate_compares_against_the_equilibrium_baseline() {
    let auction: Auction = serde_json::from_str(SINGLE_PAIR).unwrap();
    let evaluation = auction.evaluate(30.0).unwrap();

    assert_eq!(evaluation.market_price, 30.0);
    // above equilibrium: demand binds at the single 35-priced block
    assert_eq!(evaluation.total_quantity, 40.0);

    let value = serde_json::to_value(&evaluation).unwrap();
    assert!(value["comparison"]["total_welfare"]["percent"].is_number());
}

#[test]
fn invalid_bids_are_rejected_at_parse_time() {
    let broken = SINGLE_PAIR.replace("\"price\": 10.0", "\"price\": -10.0");
    assert!(serde_json::from_str::<Auction>(&broken).is_err());
}

#[test]
fn uncrossed_documents_fail_to_solve() {
    let auction: Auction = serde_json::from_str(
        r#"{
            "generators": [[
                {"price": 10.0, "quantity": 0.0},
                {"price": 20.0, "quantity": 0.0},
                {"price": 30.0, "quantity": 0.0}
            ]],
            "consumers": [[
                {"price": 35.0, "quantity": 40.0},
                {"price": 25.0, "quantity": 40.0},
                {"price": 15.0, "quantity": 40.0}
            ]]
        }"#,
    )
    .unwrap();
    assert!(auction.solve().is_err());
}
