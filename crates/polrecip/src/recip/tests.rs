use super::canonical::working_dual;
use super::*;
use crate::error::{RecipError, RecipWarning};
use crate::geom3::Pt;
use crate::mesh::special::{self, PHI};
use crate::mesh::Mesh;
use nalgebra::{vector, Vector3};
use proptest::prelude::*;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn cfg_with(center: CenterMode, radius: RadiusMode) -> RecipConfig {
    RecipConfig {
        center,
        radius,
        ..RecipConfig::default()
    }
}

#[test]
fn circumcenter_is_exact_on_regular_solids() {
    let cases = [
        (special::tetrahedron(), 3f64.sqrt()),
        (special::cube(), 3f64.sqrt()),
        (special::octahedron(), 1.0),
        (special::icosahedron(), (1.0 + PHI * PHI).sqrt()),
    ];
    for (mut m, r) in cases {
        let shift = vector![1.0, -2.0, 0.5];
        m.translate(shift);
        let ctx = circumcenter(&m).unwrap();
        assert!((ctx.center - shift).norm() < 1e-10, "centre {:?}", ctx.center);
        assert!(close(ctx.radius, r, 1e-10), "radius {}", ctx.radius);
        assert!(ctx.converged);
    }
}

#[test]
fn circumcenter_rejects_coplanar_vertices() {
    let square = Mesh::new(
        vec![
            vector![0.0, 0.0, 0.0],
            vector![1.0, 0.0, 0.0],
            vector![1.0, 1.0, 0.0],
            vector![0.0, 1.0, 0.0],
        ],
        vec![vec![0, 1, 2, 3], vec![3, 2, 1, 0]],
    );
    assert_eq!(circumcenter(&square), Err(RecipError::SingularCircumcenter));
}

#[test]
fn circumcenter_survives_far_offsets() {
    for o in [1e3, 1e4, 1e6] {
        let mut m = special::cube();
        let shift = vector![o, o, o];
        m.translate(shift);
        let ctx = circumcenter(&m).unwrap();
        assert!((ctx.center - shift).norm() < 1e-6 * o, "offset {o}: {:?}", ctx.center);
        assert!(close(ctx.radius, 3f64.sqrt(), 1e-6), "offset {o}: radius {}", ctx.radius);
    }
}

#[test]
fn midsphere_finds_known_midradius() {
    let cases = [
        (special::tetrahedron(), 1.0),
        (special::cube(), 2f64.sqrt()),
        (special::octahedron(), 0.5f64.sqrt()),
        (special::cuboctahedron(), 1.5f64.sqrt()),
        (special::dodecahedron(), PHI),
    ];
    for (m, rho) in cases {
        let ctx = midsphere(&m, None, None, IterCfg::default());
        assert!(ctx.converged);
        assert!(ctx.center.norm() < 1e-10);
        assert!(close(ctx.radius, rho, 1e-10), "radius {}", ctx.radius);
    }
}

#[test]
fn midsphere_converges_from_offset_centre() {
    let m = special::cube();
    let seed = vector![0.03, -0.02, 0.01];
    let ctx = midsphere(&m, Some(seed), Some(1.0), IterCfg::default());
    assert!(ctx.converged, "stopped after {} iterations", ctx.iters);
    assert!(ctx.iters > 1);
    assert!(ctx.center.norm() < 1e-9);
    assert!(close(ctx.radius, 2f64.sqrt(), 1e-9));
}

#[test]
fn canonical_edge_balance_radius_is_midradius() {
    let cases = [
        (special::tetrahedron(), 1.0),
        (special::cube(), 2f64.sqrt()),
        (special::octahedron(), 0.5f64.sqrt()),
    ];
    for (m, rho) in cases {
        for invert in [false, true] {
            let ctx = canonical(&m, Balance::Edge, invert, None, Some(1.0), IterCfg::default());
            assert!(ctx.converged);
            assert!(ctx.center.norm() < 1e-10);
            assert!(close(ctx.radius, rho, 1e-9), "radius {}", ctx.radius);
        }
    }
}

#[test]
fn canonical_vertex_face_balance_radius() {
    let cube = canonical(
        &special::cube(),
        Balance::VertexFace,
        false,
        None,
        None,
        IterCfg::default(),
    );
    assert!(cube.converged);
    assert!(close(cube.radius, 3f64.powf(0.25), 1e-9));

    let octa = canonical(
        &special::octahedron(),
        Balance::VertexFace,
        false,
        None,
        None,
        IterCfg::default(),
    );
    assert!(octa.converged);
    assert!(close(octa.radius, 3f64.powf(-0.25), 1e-9));
}

#[test]
fn canonical_combined_radius_lies_between_edge_and_vertex_face() {
    let m = special::cube();
    let ctx = canonical(&m, Balance::Combined, false, None, None, IterCfg::default());
    assert!(ctx.converged);
    assert!(ctx.radius > 3f64.powf(0.25) && ctx.radius < 2f64.sqrt());
    let dual = working_dual(&m, ctx.center, ctx.radius, false);
    let t = balance_terms(&m, &dual, ctx.center, Balance::Combined);
    assert!(close(t.primal / t.dual, 1.0, 1e-9));
}

#[test]
fn canonical_error_shrinks_with_more_iterations() {
    let m = special::cube();
    let seed = vector![0.05, 0.0, 0.0];
    let errs: Vec<f64> = [4, 8, 16, 32]
        .into_iter()
        .map(|max_iters| {
            let iter = IterCfg {
                max_iters,
                ..IterCfg::default()
            };
            let ctx = canonical(&m, Balance::Edge, false, Some(seed), None, iter);
            assert!(!ctx.converged);
            assert_eq!(ctx.iters, max_iters);
            ctx.center.norm()
        })
        .collect();
    for w in errs.windows(2) {
        assert!(w[1] < w[0], "errors not decreasing: {errs:?}");
    }
    assert!(errs[0] < seed.norm());
}

#[test]
fn canonical_residuals_shrink_pair_by_pair_near_fixed_point() {
    // Radius drift from a centre offset is second order; residuals below it are settled.
    let offset = vector![0.6, -0.48, 0.64] * 1e-4;
    let floor = 1e-7;
    let solids = [
        ("tetrahedron", special::tetrahedron()),
        ("cube", special::cube()),
        ("octahedron", special::octahedron()),
        ("dodecahedron", special::dodecahedron()),
    ];
    for (name, m) in &solids {
        for balance in [Balance::Edge, Balance::VertexFace, Balance::Combined] {
            let fixed = canonical(m, balance, false, None, None, IterCfg::default());
            assert!(fixed.converged, "{name} {balance:?} reference did not converge");
            let residuals: Vec<(f64, f64)> = (1..=6)
                .map(|pairs| {
                    let iter = IterCfg {
                        max_iters: 2 * pairs,
                        ..IterCfg::default()
                    };
                    let ctx = canonical(
                        m,
                        balance,
                        false,
                        Some(fixed.center + offset),
                        Some(0.99 * fixed.radius),
                        iter,
                    );
                    assert_eq!(ctx.iters, 2 * pairs, "{name} {balance:?}");
                    (ctx.center_test.abs(), ctx.radius_test.abs())
                })
                .collect();
            for w in residuals.windows(2) {
                let ((c0, r0), (c1, r1)) = (w[0], w[1]);
                assert!(c1 <= c0 || c1 < floor, "{name} {balance:?} centre: {residuals:?}");
                assert!(r1 <= r0 || r1 < floor, "{name} {balance:?} radius: {residuals:?}");
            }
            assert!(residuals[5].0 < residuals[0].0, "{name} {balance:?}: {residuals:?}");
        }
    }
}

#[test]
fn canonical_edge_balance_holds_on_jittered_cube() {
    let m = special::jitter(&special::cube(), 0.02, 7);
    let ctx = canonical(&m, Balance::Edge, false, None, None, IterCfg::default());
    assert!(ctx.converged, "stopped after {} iterations", ctx.iters);
    let dual = working_dual(&m, ctx.center, ctx.radius, false);
    let t = balance_terms(&m, &dual, ctx.center, Balance::Edge);
    assert!(close(t.primal / t.dual, 1.0, 1e-8));
    assert!((t.center - ctx.center).norm() < 1e-8);
}

#[test]
fn span_radius_measures_point_line_plane_space() {
    let m = special::cube();
    let c = Vector3::zeros();
    assert!(close(span_radius(&m, c, &[0]).unwrap(), 3f64.sqrt(), 1e-12));
    assert!(close(span_radius(&m, c, &[0, 1]).unwrap(), 2f64.sqrt(), 1e-12));
    assert!(close(span_radius(&m, c, &[0, 1, 2]).unwrap(), 1.0, 1e-12));
    assert!(close(span_radius(&m, c, &[0, 1, 2, 7]).unwrap(), 0.0, 1e-12));
    assert_eq!(
        span_radius(&m, c, &[0, 8]),
        Err(RecipError::BadVertexIndex {
            index: 8,
            num_verts: 8
        })
    );
}

#[test]
fn extremal_radius_on_cube() {
    let m = special::cube();
    let c = Vector3::zeros();
    let r = |elem, extreme| extremal_radius(&m, c, elem, extreme);
    assert!(close(r(Elem::Vertex, Extreme::Nearest), 3f64.sqrt(), 1e-12));
    assert!(close(r(Elem::Edge, Extreme::Farthest), 2f64.sqrt(), 1e-12));
    assert!(close(r(Elem::Face, Extreme::Nearest), 1.0, 1e-12));
    let off = vector![0.5, 0.0, 0.0];
    assert!(close(extremal_radius(&m, off, Elem::Face, Extreme::Nearest), 0.5, 1e-12));
    assert!(close(extremal_radius(&m, off, Elem::Face, Extreme::Farthest), 1.5, 1e-12));
}

#[test]
fn dual_of_cube_is_outward_octahedron() {
    let out = reciprocate(&special::cube(), &RecipConfig::default()).unwrap();
    assert!(out.warnings.is_empty());
    assert!(close(out.radius, 2f64.sqrt(), 1e-12));
    let m = &out.mesh;
    assert_eq!((m.verts.len(), m.faces.len()), (6, 8));
    assert!(m.validate_polyhedron().is_ok());
    assert!(m.signed_volume() > 0.0);
    for v in &m.verts {
        assert!(close(v.norm(), 2.0, 1e-12));
    }
}

#[test]
fn auto_radius_follows_centre_mode() {
    let cube = special::cube();
    let circ = reciprocate(&cube, &cfg_with(CenterMode::Circumcenter, RadiusMode::Auto)).unwrap();
    assert!(close(circ.radius, 3f64.sqrt(), 1e-10));
    let point = reciprocate(
        &cube,
        &cfg_with(CenterMode::Point(vector![0.1, 0.0, 0.0]), RadiusMode::Auto),
    )
    .unwrap();
    assert_eq!(point.radius, 1.0);
    assert!(point.ctx.is_none());
    let canon = reciprocate(
        &cube,
        &cfg_with(
            CenterMode::Canonical {
                balance: Balance::VertexFace,
                invert: false,
            },
            RadiusMode::Auto,
        ),
    )
    .unwrap();
    assert!(close(canon.radius, 3f64.powf(0.25), 1e-9));
}

#[test]
fn inverted_dual_is_reflected_and_outward() {
    let cfg = RecipConfig {
        center: CenterMode::Point(vector![0.2, 0.1, 0.0]),
        radius: RadiusMode::Value(1.0),
        ..RecipConfig::default()
    };
    let plain = reciprocate(&special::cube(), &cfg).unwrap();
    let inv = reciprocate(
        &special::cube(),
        &RecipConfig {
            invert: true,
            ..cfg
        },
    )
    .unwrap();
    let c = vector![0.2, 0.1, 0.0];
    for (p, q) in plain.mesh.verts.iter().zip(&inv.mesh.verts) {
        assert!((*p + *q - c * 2.0).norm() < 1e-12);
    }
    assert!(inv.mesh.signed_volume() > 0.0);
}

#[test]
fn ideal_vertex_deleted_with_zero_cap() {
    // Centre on the plane of face 5 (x = +1).
    let cfg = RecipConfig {
        center: CenterMode::Point(vector![1.0, 0.0, 0.0]),
        radius: RadiusMode::Value(1.0),
        ideal_cap: 0.0,
        ..RecipConfig::default()
    };
    let out = reciprocate(&special::cube(), &cfg).unwrap();
    assert!(out
        .warnings
        .contains(&RecipWarning::RemovedIdealVertices { indices: vec![5] }));
    let m = &out.mesh;
    assert_eq!(m.verts.len(), 5);
    assert_eq!(m.faces.len(), 4);
    assert!(m.edges.is_empty());
    assert!(m.check_indices().is_ok());
    assert!(m.edge_face_counts().values().all(|&n| n <= 2));
}

#[test]
fn ideal_vertex_capped_with_extra_elements() {
    let cfg = RecipConfig {
        center: CenterMode::Point(vector![1.0, 0.0, 0.0]),
        radius: RadiusMode::Value(1.0),
        ideal_cap: 1000.0,
        ..RecipConfig::default()
    };
    let out = reciprocate(&special::cube(), &cfg).unwrap();
    assert!(out.warnings.is_empty());
    let m = &out.mesh;
    assert_eq!(m.verts.len(), 7);
    assert_eq!(m.faces.len(), 8);
    assert!((m.verts[5] - vector![1001.0, 0.0, 0.0]).norm() < 1e-9);
    assert!((m.verts[6] - vector![-999.0, 0.0, 0.0]).norm() < 1e-9);
    assert_eq!(m.edges, vec![[5, 6]]);

    let bare = reciprocate(
        &special::cube(),
        &RecipConfig {
            extra_ideal_elems: false,
            ..cfg
        },
    )
    .unwrap();
    assert_eq!(bare.mesh.verts.len(), 6);
    assert!(bare.mesh.edges.is_empty());
}

#[test]
fn build_dual_marks_ideal_points() {
    let dual = build_dual(&special::cube(), vector![0.0, 0.0, -1.0], 1.0);
    assert_eq!(dual.num_ideal(), 1);
    assert!(matches!(dual.pts[0], Pt::Ideal(d) if (d - vector![0.0, 0.0, -1.0]).norm() < 1e-12));
    assert_eq!(dual.faces.len(), 8);
}

#[test]
fn single_iteration_warns_but_yields_dual() {
    let cfg = RecipConfig {
        center: CenterMode::Midsphere,
        init_center: InitCenter::Point(vector![0.1, 0.0, 0.0]),
        iter: IterCfg {
            max_iters: 1,
            ..IterCfg::default()
        },
        ..RecipConfig::default()
    };
    let out = reciprocate(&special::cube(), &cfg).unwrap();
    assert!(out.warnings.iter().any(|w| matches!(
        w,
        RecipWarning::NotConverged {
            solver: "midsphere",
            iters: 1,
            ..
        }
    )));
    assert!(out.mesh.validate_polyhedron().is_ok());
    assert_eq!(out.mesh.faces.len(), 8);
    assert!(!out.ctx.unwrap().converged);
}

#[test]
fn append_keeps_primal_then_dual() {
    let cfg = RecipConfig {
        append: true,
        ..RecipConfig::default()
    };
    let cube = special::cube();
    let out = reciprocate(&cube, &cfg).unwrap();
    assert_eq!(out.mesh.verts.len(), 14);
    assert_eq!(out.mesh.faces.len(), 14);
    assert_eq!(&out.mesh.verts[..8], &cube.verts[..]);
}

#[test]
fn append_orients_inside_out_primal() {
    let mut cube = special::cube();
    for f in &mut cube.faces {
        f.reverse();
    }
    assert!(cube.signed_volume() < 0.0);
    let cfg = RecipConfig {
        append: true,
        ..RecipConfig::default()
    };
    let out = reciprocate(&cube, &cfg).unwrap();
    let primal = Mesh::new(out.mesh.verts[..8].to_vec(), out.mesh.faces[..6].to_vec());
    assert!(close(primal.signed_volume(), 8.0, 1e-9), "{}", primal.signed_volume());
    let dual_faces: Vec<Vec<usize>> = out.mesh.faces[6..]
        .iter()
        .map(|f| f.iter().map(|v| v - 8).collect())
        .collect();
    let dual = Mesh::new(out.mesh.verts[8..].to_vec(), dual_faces);
    assert!(dual.signed_volume() > 0.0);
}

#[test]
fn free_elements_are_stripped_with_warning() {
    let mut m = special::cube();
    m.verts.push(vector![5.0, 5.0, 5.0]);
    let out = reciprocate(&m, &RecipConfig::default()).unwrap();
    assert_eq!(out.warnings, vec![RecipWarning::StrippedFreeElements]);
    let plain = reciprocate(&special::cube(), &RecipConfig::default()).unwrap();
    assert_eq!(out.mesh, plain.mesh);
    // The caller's mesh is untouched.
    assert_eq!(m.verts.len(), 9);
}

#[test]
fn negative_radius_warns_and_uses_magnitude() {
    let out = reciprocate(
        &special::cube(),
        &cfg_with(CenterMode::Centroid, RadiusMode::Value(-2.0)),
    )
    .unwrap();
    assert_eq!(out.radius, 2.0);
    assert!(matches!(&out.warnings[..], [RecipWarning::Config { .. }]));
}

#[test]
fn invalid_input_and_options_are_errors() {
    let cube = special::cube();
    let bad_cap = RecipConfig {
        ideal_cap: -1.0,
        ..RecipConfig::default()
    };
    assert!(matches!(
        reciprocate(&cube, &bad_cap),
        Err(RecipError::InvalidConfig { .. })
    ));
    let bad_eps = RecipConfig {
        iter: IterCfg {
            epsilon: 0.0,
            ..IterCfg::default()
        },
        ..RecipConfig::default()
    };
    assert!(bad_eps.validate().is_err());
    assert!(IterCfg::max_iters_from(-1).is_err());
    assert_eq!(IterCfg::max_iters_from(25), Ok(25));

    let span = cfg_with(CenterMode::Centroid, RadiusMode::Span(vec![0, 42]));
    assert!(matches!(
        reciprocate(&cube, &span),
        Err(RecipError::BadVertexIndex { index: 42, .. })
    ));

    let mut open = special::cube();
    open.faces.truncate(5);
    assert!(matches!(
        reciprocate(&open, &RecipConfig::default()),
        Err(RecipError::NotClosed { .. })
    ));
}

#[test]
fn mode_strings_decode() {
    assert_eq!(
        "E".parse::<CenterMode>(),
        Ok(CenterMode::Canonical {
            balance: Balance::Edge,
            invert: true
        })
    );
    assert_eq!(
        "a".parse::<CenterMode>(),
        Ok(CenterMode::Canonical {
            balance: Balance::Combined,
            invert: false
        })
    );
    assert_eq!("R".parse::<CenterMode>(), Ok(CenterMode::Circumcenter));
    assert_eq!(
        "1,2.5,-3".parse::<CenterMode>(),
        Ok(CenterMode::Point(vector![1.0, 2.5, -3.0]))
    );
    assert_eq!("0".parse::<CenterMode>(), Ok(CenterMode::Point(Vector3::zeros())));
    assert!("Q".parse::<CenterMode>().is_err());
    assert!("1,2".parse::<CenterMode>().is_err());

    assert_eq!("M".parse::<InitCenter>(), Ok(InitCenter::Midsphere));
    assert!("R".parse::<InitCenter>().is_err());

    assert_eq!(
        "e".parse::<RadiusMode>(),
        Ok(RadiusMode::Extremal {
            elem: Elem::Edge,
            extreme: Extreme::Nearest
        })
    );
    assert_eq!(
        "F".parse::<RadiusMode>(),
        Ok(RadiusMode::Extremal {
            elem: Elem::Face,
            extreme: Extreme::Farthest
        })
    );
    assert_eq!("2.5".parse::<RadiusMode>(), Ok(RadiusMode::Value(2.5)));
    assert_eq!("0,3,5".parse::<RadiusMode>(), Ok(RadiusMode::Span(vec![0, 3, 5])));
    assert!("1,x".parse::<RadiusMode>().is_err());
}

#[test]
fn precision_digits_map_to_epsilon() {
    let (eps, warn) = IterCfg::epsilon_from_sig_digits(12);
    assert!(close(eps, 1e-12, 1e-24));
    assert!(warn.is_none());
    assert!(IterCfg::epsilon_from_sig_digits(18).1.is_some());
    assert!(IterCfg::epsilon_from_sig_digits(-1).1.is_some());
}

proptest! {
    #[test]
    fn reciprocating_twice_recovers_primal(
        x in -0.5f64..0.5,
        y in -0.5f64..0.5,
        z in -0.5f64..0.5,
        r in 0.5f64..2.0,
        octa in any::<bool>(),
    ) {
        let primal = if octa {
            let mut m = special::octahedron();
            m.map_verts(|v| v * 2.0);
            m
        } else {
            special::cube()
        };
        let c = vector![x, y, z];
        let opts = IdealOpts { cap: 0.0, extra_elems: false, invert: false };
        let (dual, removed) = build_dual(&primal, c, r).finish(c, opts);
        prop_assert!(removed.is_empty());
        let back = build_dual(&dual, c, r);
        prop_assert_eq!(back.pts.len(), primal.verts.len());
        for (p, v) in back.pts.iter().zip(&primal.verts) {
            let p = p.finite();
            prop_assert!(p.is_some());
            prop_assert!((p.unwrap() - v).norm() < 1e-9);
        }
    }

    #[test]
    fn nearest_never_exceeds_farthest(
        x in -0.8f64..0.8,
        y in -0.8f64..0.8,
        z in -0.8f64..0.8,
        seed in 0u64..1000,
    ) {
        let m = special::jitter(&special::cube(), 0.05, seed);
        let c = vector![x, y, z];
        for elem in [Elem::Vertex, Elem::Edge, Elem::Face] {
            let near = extremal_radius(&m, c, elem, Extreme::Nearest);
            let far = extremal_radius(&m, c, elem, Extreme::Farthest);
            prop_assert!(near <= far, "{:?}: {} > {}", elem, near, far);
        }
    }
}
