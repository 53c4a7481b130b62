use test_log::test;

use super::*;

fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::new(Point::new(x1, y1), Point::new(x2, y2))
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Closed axis-aligned box, walls listed bottom, right, top, left.
fn room(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Segment> {
    vec![
        seg(x0, y0, x1, y0),
        seg(x1, y0, x1, y1),
        seg(x1, y1, x0, y1),
        seg(x0, y1, x0, y0),
    ]
}

fn set(ids: &[usize]) -> VisibleSubset {
    ids.iter().copied().collect()
}

#[test]
fn guard_sampling() {
    let guard = seg(0., 0., 10., 0.);
    let samples = sample_guard(&guard, 1.);
    assert_eq!(samples.len(), 11);
    assert_eq!(samples[0].point, pt(0., 0.));
    assert_eq!(samples[10].point, pt(10., 0.));
    assert!(samples.iter().all(|s| s.mount == guard && s.point.y == 0.));

    // Step doesn't divide the length: spacing shrinks to 2.5
    let xs: Vec<f64> = sample_guard(&guard, 3.).iter().map(|s| s.point.x).collect();
    assert_eq!(xs, vec![0., 2.5, 5., 7.5, 10.]);

    let point = seg(4., 4., 4., 4.);
    assert_eq!(sample_guard(&point, 1.).len(), 1);
}

fn on(point: Point, mount: Segment) -> Sample {
    Sample { point, mount }
}

fn visible_ids(problem: &CoverageProblem, sample: &Sample) -> Vec<usize> {
    problem.visible_targets(sample).iter().map(|t| t.id).collect()
}

#[test]
fn walls_block_sight() {
    let mut guards = room(0., 0., 10., 10.);
    guards.extend(room(20., 0., 30., 10.));
    let problem = CoverageProblem::new(guards, vec![], vec![pt(5., 5.), pt(25., 5.)]);
    let g = problem.guards.clone();
    assert_eq!(visible_ids(&problem, &on(pt(5., 0.), g[0])), vec![0]);
    assert_eq!(visible_ids(&problem, &on(pt(10., 5.), g[1])), vec![0]);
    assert_eq!(visible_ids(&problem, &on(pt(25., 10.), g[6])), vec![1]);
    // Between the boxes, both are walled off
    let between = on(pt(15., 5.), seg(15., 0., 15., 10.));
    assert_eq!(visible_ids(&problem, &between), Vec::<usize>::new());
}

#[test]
fn obstacles_block_sight_but_host_no_samples() {
    let problem = CoverageProblem::new(
        vec![seg(0., 0., 10., 0.)],
        vec![seg(3., 2., 7., 2.)],
        vec![pt(5., 5.), pt(0., 3.)],
    );
    assert_eq!(visible_ids(&problem, &on(pt(5., 0.), problem.guards[0])), vec![1]);

    let placement = solve(&problem, &CoverageConfig::default()).unwrap();
    let placement = placement.expect("the left end of the wall sees both targets");
    assert_eq!(placement.first.mount, problem.guards[0]);
}

#[test]
fn slanted_mount_does_not_hide_either_side() {
    // Interpolated samples land just off a slanted wall; it must not block its own samples
    let wall = seg(754., 335., 790., 315.);
    let problem = CoverageProblem::new(vec![wall], vec![], vec![pt(792., 361.), pt(752., 289.)]);
    let samples = sample_guard(&wall, 0.25);
    assert_eq!(samples.len(), 166);
    for sample in &samples {
        assert_eq!(visible_ids(&problem, sample), vec![0, 1], "{}", sample.point);
    }

    // The targets sit on opposite sides, so one camera can't take both at once
    let placement = solve(&problem, &CoverageConfig::default()).unwrap().unwrap();
    assert_eq!(placement.points(), (wall.p1, wall.p1));
    assert_eq!(placement.first_subset, set(&[0]));
    assert_eq!(placement.second_subset, set(&[1]));
}

#[test]
fn aperture_limits_pairs() {
    let wall = seg(0., 0., 10., 0.);
    let sample = Sample { point: pt(5., 0.), mount: wall };

    // Exactly 90° apart
    let right_angle = CoverageProblem::new(vec![wall], vec![], vec![pt(1., 4.), pt(9., 4.)]);
    let subsets = right_angle.admissible_subsets(&sample, FRAC_PI_2);
    assert_eq!(subsets, vec![set(&[0, 1]), set(&[0]), set(&[1])]);

    // Wider than 90°: only singletons
    let wide = CoverageProblem::new(vec![wall], vec![], vec![pt(0., 3.), pt(10., 3.)]);
    let subsets = wide.admissible_subsets(&sample, FRAC_PI_2);
    assert_eq!(subsets, vec![set(&[0]), set(&[1])]);
}

#[test]
fn sector_collects_targets_between_the_pair() {
    let wall = seg(0., 0., 10., 0.);
    let sample = Sample { point: pt(5., 0.), mount: wall };
    let targets = vec![pt(3., 5.), pt(7., 5.), pt(5., 8.)];
    let problem = CoverageProblem::new(vec![wall], vec![], targets);
    let subsets = problem.admissible_subsets(&sample, FRAC_PI_2);
    assert_eq!(subsets[0], set(&[0, 1, 2]));
    assert!(subsets.contains(&set(&[2])));
}

#[test]
fn mounting_wall_splits_sector() {
    // Targets above and below the wall, seen from its middle: the sectors that straddle the
    // wall's right end get split there, so no camera sees across the wall.
    let wall = seg(0., 0., 10., 0.);
    let sample = Sample { point: pt(5., 0.), mount: wall };
    let problem = CoverageProblem::new(
        vec![wall],
        vec![],
        vec![pt(8., 2.), pt(8., -2.), pt(9., 1.), pt(9., -1.)],
    );
    let subsets = problem.admissible_subsets(&sample, FRAC_PI_2);
    assert!(subsets.contains(&set(&[0, 2])));
    assert!(subsets.contains(&set(&[1, 3])));
    for s in &subsets {
        let above = s.contains(&0) || s.contains(&2);
        let below = s.contains(&1) || s.contains(&3);
        assert!(!(above && below), "subset {:?} sees across the wall", s);
    }
    // Singletons for every visible target, and no duplicates
    for id in 0..4 {
        assert!(subsets.contains(&set(&[id])));
    }
    assert_eq!(subsets.len(), subsets.iter().unique().count());
}

#[test]
fn corner_sample_sees_both_targets() {
    let targets = vec![pt(3., 5.), pt(5., 3.)];
    let problem = CoverageProblem::new(room(0., 0., 10., 10.), vec![], targets);
    let placement = solve(&problem, &CoverageConfig::default()).unwrap().unwrap();
    assert_eq!(placement.first.point, placement.second.point);
    assert_eq!(placement.points(), (pt(0., 0.), pt(0., 0.)));
    assert_eq!(placement.first_subset, set(&[0, 1]));
}

#[test]
fn isolated_targets_have_no_solution() {
    // Each target is sealed in its own box; any sample sees at most one of the three.
    let mut guards = room(0., 0., 10., 10.);
    guards.extend(room(20., 0., 30., 10.));
    guards.extend(room(40., 0., 50., 10.));
    let problem = CoverageProblem::new(guards, vec![], vec![pt(5., 5.), pt(25., 5.), pt(45., 5.)]);

    let config = CoverageConfig::default();
    for guard in &problem.guards {
        for sample in sample_guard(guard, config.step) {
            assert!(problem.visible_targets(&sample).len() <= 1, "{}", sample.point);
        }
    }
    assert_eq!(solve(&problem, &config).unwrap(), None);
}

#[test]
fn split_rooms_need_two_cameras() {
    // A partition wall keeps the left room's corner from seeing into the right room.
    let mut guards = room(0., 0., 20., 10.);
    guards.push(seg(10., 0., 10., 10.));
    let problem = CoverageProblem::new(guards, vec![], vec![pt(5., 5.), pt(15., 5.)]);
    let config = CoverageConfig::default();
    let placement = solve(&problem, &config).unwrap().unwrap();

    assert_eq!(placement.first.point, pt(0., 0.));
    assert_ne!(placement.first.point, placement.second.point);
    assert_eq!(placement.first_subset, set(&[0]));
    assert!(placement.second_subset.contains(&1));

    // Either order of the two cameras still covers everything
    let first = problem.admissible_subsets(&placement.first, config.aperture);
    let second = problem.admissible_subsets(&placement.second, config.aperture);
    assert!(covers(&first, &second, 2).is_some());
    assert!(covers(&second, &first, 2).is_some());
    assert!(first.contains(&placement.first_subset));
    assert!(second.contains(&placement.second_subset));
}

#[test]
fn no_targets_no_placement() {
    let problem = CoverageProblem::new(room(0., 0., 10., 10.), vec![], vec![]);
    assert_eq!(solve(&problem, &CoverageConfig::default()).unwrap(), None);
}

#[test]
fn invalid_config() {
    let problem = CoverageProblem::new(room(0., 0., 10., 10.), vec![], vec![pt(5., 5.)]);
    let solve_with = |step: f64, aperture: f64| solve(&problem, &CoverageConfig { step, aperture });
    assert_eq!(solve_with(0., FRAC_PI_2), Err(SolveError::InvalidStep(0.)));
    assert!(matches!(solve_with(f64::NAN, FRAC_PI_2), Err(SolveError::InvalidStep(_))));
    assert_eq!(solve_with(1., 2.), Err(SolveError::InvalidAperture(2.)));
    assert_eq!(solve_with(1., 0.), Err(SolveError::InvalidAperture(0.)));
}

#[test]
fn duplicate_target_ids() {
    let targets = vec![pt(5., 5.), pt(6., 6.)];
    let mut problem = CoverageProblem::new(room(0., 0., 10., 10.), vec![], targets);
    problem.targets[1].id = 0;
    assert_eq!(
        solve(&problem, &CoverageConfig::default()),
        Err(SolveError::DuplicateTarget(0))
    );
}

#[test]
fn problem_from_json() {
    let problem: CoverageProblem = serde_json::from_str(
        r#"{
            "guards": [ [[0, 0], [10, 0]] ],
            "targets": [ { "id": 3, "point": [2, 2] } ]
        }"#,
    )
    .unwrap();
    assert_eq!(problem.guards, vec![seg(0., 0., 10., 0.)]);
    assert!(problem.obstacles.is_empty());
    assert_eq!(problem.targets[0], TargetPoint { id: 3, point: pt(2., 2.) });
}
