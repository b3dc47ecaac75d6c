//! Behaviour tests for the end-to-end priority pipeline.

#![expect(
    clippy::float_arithmetic,
    reason = "reference scores are computed with floating-point maths"
)]

use std::cell::RefCell;

use firecut_core::test_support::{
    feature_with, line_feature, point_feature, rectangle, square, square_cell,
};
use firecut_core::{
    AttributeSelector, Factor, FactorScores, Footprint, GridCell, PriorityClass, ReferenceFeature,
    ReferenceLayer, ReferenceLayers, ScoreTable, UtilityKind,
};
use firecut_scorer::{DecayProfile, PriorityEngine};
use geo::{Coord, Point};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;

type Magnitude = Box<dyn Fn(&ReferenceFeature) -> f64>;

#[derive(Default)]
struct Survey {
    grid: Vec<GridCell>,
    layers: ReferenceLayers,
}

#[fixture]
fn survey() -> RefCell<Survey> {
    RefCell::new(Survey::default())
}

#[fixture]
fn tables() -> RefCell<Vec<ScoreTable>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn full_scan() -> RefCell<Vec<FactorScores>> {
    RefCell::new(Vec::new())
}

fn survey_grid() -> Vec<GridCell> {
    let mut cells: Vec<GridCell> = (0..3_u32)
        .flat_map(|column| (0..2_u32).map(move |row| (column, row)))
        .zip(1_u64..)
        .map(|((column, row), id)| {
            square_cell(id, f64::from(column * 100), f64::from(row * 100), 100.0)
        })
        .collect();
    cells.push(square_cell(7, 5_000.0, 5_000.0, 100.0));
    cells.push(square_cell(8, 5_200.0, 5_000.0, 100.0));
    cells
}

fn survey_layers() -> ReferenceLayers {
    let mut layers = ReferenceLayers::default();
    layers
        .mortality
        .push(feature_with(square(50.0, 50.0, 120.0), "MORT_PCT", json!(5)));
    layers.mortality.push(feature_with(
        rectangle(Coord { x: 150.0, y: 0.0 }, Coord { x: 300.0, y: 60.0 }),
        "MORT_PCT",
        json!(9),
    ));
    layers.mortality.push(feature_with(
        rectangle(Coord { x: 0.0, y: 150.0 }, Coord { x: 40.0, y: 200.0 }),
        "NOTE",
        json!("unsurveyed"),
    ));

    layers
        .community
        .push(feature_with(Point::new(320.0, 150.0), "IMPORTANCE", json!(7)));
    layers.community.push(point_feature(-80.0, 50.0));

    layers
        .egress
        .push(line_feature((0.0, -20.0), (300.0, -20.0), "PRIORITY", json!(6)));
    layers
        .egress
        .push(line_feature((310.0, 0.0), (310.0, 200.0), "ROUTE_CLASS", json!("2")));

    layers
        .populated
        .push(feature_with(square(100.0, 100.0, 150.0), "POP_DENS", json!(4)));
    layers.populated.push(feature_with(
        rectangle(Coord { x: 0.0, y: 180.0 }, Coord { x: 300.0, y: 260.0 }),
        "DENSITY",
        json!(2),
    ));

    let utilities = &mut layers.utilities;
    utilities
        .layer_mut(UtilityKind::Transmission)
        .push(line_feature((-10.0, 0.0), (-10.0, 200.0), "KV", json!(500)));
    utilities
        .layer_mut(UtilityKind::SubTransmission)
        .push(line_feature((2_000.0, 0.0), (2_000.0, 200.0), "KV", json!(69)));
    utilities
        .layer_mut(UtilityKind::Distribution)
        .push(line_feature((0.0, 210.0), (300.0, 210.0), "KV", json!(12)));
    utilities
        .layer_mut(UtilityKind::Substation)
        .push(point_feature(150.0, 150.0));
    utilities
        .layer_mut(UtilityKind::PoleTop)
        .push(point_feature(290.0, 10.0));
    layers
}

fn overlay(cell: &Footprint, layer: &ReferenceLayer) -> f64 {
    let selector = AttributeSelector::mortality();
    let mut weighted = 0.0;
    let mut covered = 0.0;
    for feature in layer.features() {
        if !cell.intersects(&feature.geometry) {
            continue;
        }
        let shared = cell.intersection_area(&feature.geometry);
        if shared > 0.0 {
            weighted += selector.resolve(&feature.attributes) * shared;
            covered += shared;
        }
    }
    if covered > 0.0 { weighted / covered } else { 0.0 }
}

fn exposure(cell: &Footprint, layer: &ReferenceLayer) -> f64 {
    let selector = AttributeSelector::population();
    let mut total = 0.0;
    for feature in layer.features() {
        if cell.intersects(&feature.geometry) {
            total += cell.intersection_area(&feature.geometry) / cell.area()
                * selector.resolve(&feature.attributes);
        }
    }
    total
}

fn nearest<'a>(
    cell: &Footprint,
    profile: DecayProfile,
    layers: impl IntoIterator<Item = (&'a ReferenceLayer, Magnitude)>,
) -> f64 {
    let mut best = 0.0_f64;
    for (layer, magnitude) in layers {
        for feature in layer.features() {
            let contribution = profile.contribution(
                magnitude(feature),
                cell.distance(&feature.geometry),
                cell.intersects(&feature.geometry),
            );
            best = best.max(contribution);
        }
    }
    best
}

fn from_attribute(selector: AttributeSelector) -> Magnitude {
    Box::new(move |feature: &ReferenceFeature| selector.resolve(&feature.attributes))
}

fn scan(cell: &GridCell, layers: &ReferenceLayers) -> FactorScores {
    let footprint = Footprint::new(&cell.geometry);
    let utilities = layers.utilities.iter().map(|(kind, layer)| {
        let base = kind.base_priority();
        let magnitude: Magnitude = Box::new(move |_: &ReferenceFeature| base);
        (layer, magnitude)
    });
    FactorScores {
        mortality: overlay(&footprint, &layers.mortality),
        community: nearest(
            &footprint,
            DecayProfile::COMMUNITY,
            [(&layers.community, from_attribute(AttributeSelector::community()))],
        ),
        egress: nearest(
            &footprint,
            DecayProfile::EGRESS,
            [(&layers.egress, from_attribute(AttributeSelector::egress()))],
        ),
        population: exposure(&footprint, &layers.populated),
        utility: nearest(&footprint, DecayProfile::UTILITY, utilities),
    }
}

fn run(survey: &RefCell<Survey>) -> ScoreTable {
    let current = survey.borrow();
    PriorityEngine::default().run(current.grid.clone(), &current.layers)
}

#[given("a survey grid with every layer populated")]
fn given_survey(#[from(survey)] survey: &RefCell<Survey>) {
    *survey.borrow_mut() = Survey {
        grid: survey_grid(),
        layers: survey_layers(),
    };
}

#[when("the pipeline runs twice")]
fn when_runs_twice(
    #[from(survey)] survey: &RefCell<Survey>,
    #[from(tables)] tables: &RefCell<Vec<ScoreTable>>,
) {
    let first = run(survey);
    let second = run(survey);
    tables.borrow_mut().extend([first, second]);
}

#[when("the pipeline runs")]
fn when_runs(
    #[from(survey)] survey: &RefCell<Survey>,
    #[from(tables)] tables: &RefCell<Vec<ScoreTable>>,
) {
    let table = run(survey);
    tables.borrow_mut().push(table);
}

#[when("raw scores are computed by a full scan")]
fn when_full_scan(
    #[from(survey)] survey: &RefCell<Survey>,
    #[from(full_scan)] full_scan: &RefCell<Vec<FactorScores>>,
) {
    let current = survey.borrow();
    let scores = current
        .grid
        .iter()
        .map(|cell| scan(cell, &current.layers))
        .collect();
    *full_scan.borrow_mut() = scores;
}

#[then("both score tables are identical")]
fn then_identical(#[from(tables)] tables: &RefCell<Vec<ScoreTable>>) {
    let runs = tables.borrow();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs.first(), runs.last());
}

#[then("ranks start at one without gaps")]
fn then_dense(#[from(tables)] tables: &RefCell<Vec<ScoreTable>>) {
    let runs = tables.borrow();
    let table = runs.first().expect("pipeline ran");
    let mut ranks: Vec<u32> = table.iter().map(|cell| cell.scores.rank).collect();
    ranks.sort_unstable();
    ranks.dedup();
    let expected: Vec<u32> = (1..=u32::try_from(ranks.len()).expect("few ranks")).collect();
    assert_eq!(ranks, expected);
}

#[then("equal priorities share a rank")]
fn then_ties(#[from(tables)] tables: &RefCell<Vec<ScoreTable>>) {
    let runs = tables.borrow();
    let table = runs.first().expect("pipeline ran");
    for cell in table {
        for other in table {
            if cell.scores.priority == other.scores.priority {
                assert_eq!(cell.scores.rank, other.scores.rank);
            } else if cell.scores.priority > other.scores.priority {
                assert!(cell.scores.rank < other.scores.rank);
            }
        }
    }
    let remote: Vec<u32> = [7, 8]
        .iter()
        .filter_map(|id| table.get(*id))
        .map(|cell| cell.scores.rank)
        .collect();
    assert_eq!(remote.len(), 2);
    assert_eq!(remote.first(), remote.last());
}

#[then("the full scan matches the indexed raw scores")]
fn then_scan_matches(
    #[from(survey)] survey: &RefCell<Survey>,
    #[from(full_scan)] full_scan: &RefCell<Vec<FactorScores>>,
) {
    let mut cells = survey.borrow().grid.clone();
    PriorityEngine::default().score_factors(&mut cells, &survey.borrow().layers);
    let indexed: Vec<FactorScores> = cells.iter().map(|cell| cell.scores.raw).collect();
    let scanned = full_scan.borrow();
    assert_eq!(indexed, *scanned);
    for factor in Factor::ALL {
        assert!(
            indexed.iter().any(|scores| scores.get(factor) > 0.0),
            "survey leaves {factor} unexercised"
        );
    }
}

#[then("the class distribution covers every cell")]
fn then_distribution(#[from(tables)] tables: &RefCell<Vec<ScoreTable>>) {
    let runs = tables.borrow();
    let table = runs.first().expect("pipeline ran");
    let distribution = table.distribution();
    let counted: usize = distribution.shares.iter().map(|share| share.count).sum();
    assert_eq!(counted, table.len());
    let percent: f64 = distribution.shares.iter().map(|share| share.percentage).sum();
    assert!((percent - 100.0).abs() < 1e-9);
    let high = distribution.count(PriorityClass::High) + distribution.count(PriorityClass::VeryHigh);
    assert_eq!(table.high_priority().count(), high);
}

#[scenario(path = "tests/features/pipeline.feature", index = 0)]
fn deterministic_runs(
    survey: RefCell<Survey>,
    tables: RefCell<Vec<ScoreTable>>,
    full_scan: RefCell<Vec<FactorScores>>,
) {
    let _ = (survey, tables, full_scan);
}

#[scenario(path = "tests/features/pipeline.feature", index = 1)]
fn dense_ranks(
    survey: RefCell<Survey>,
    tables: RefCell<Vec<ScoreTable>>,
    full_scan: RefCell<Vec<FactorScores>>,
) {
    let _ = (survey, tables, full_scan);
}

#[scenario(path = "tests/features/pipeline.feature", index = 2)]
fn pruning_matches_scan(
    survey: RefCell<Survey>,
    tables: RefCell<Vec<ScoreTable>>,
    full_scan: RefCell<Vec<FactorScores>>,
) {
    let _ = (survey, tables, full_scan);
}

#[scenario(path = "tests/features/pipeline.feature", index = 3)]
fn every_cell_classified(
    survey: RefCell<Survey>,
    tables: RefCell<Vec<ScoreTable>>,
    full_scan: RefCell<Vec<FactorScores>>,
) {
    let _ = (survey, tables, full_scan);
}
