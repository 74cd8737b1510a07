use std::cell::RefCell;
use std::rc::Rc;

use burn_ndarray::NdArray;

use rroi_core::{
    GeometryShape, ImageFrame, ImageObj, Result, RoiError, RoiShape, ShapeKind, SignalFrame,
    SignalObj,
};
use rroi_session::{
    ImageEditSession, ProxyKind, RoiProxyItem, SessionState, SignalEditSession,
};

type Backend = NdArray<f32>;

/// Display metadata pushed into a fake plot item by the session, kept
/// behind an `Rc` so tests can observe it after the box moved into the
/// session.
#[derive(Debug, Default)]
struct ItemState {
    title: String,
}

struct FakeItem {
    kind: ProxyKind,
    coords: Vec<f64>,
    state: Rc<RefCell<ItemState>>,
}

impl RoiProxyItem for FakeItem {
    fn kind(&self) -> ProxyKind {
        self.kind
    }

    fn range(&self) -> Result<(f64, f64)> {
        if self.kind != ProxyKind::XRange {
            return Err(RoiError::unsupported_kind("not an x-range"));
        }
        Ok((self.coords[0], self.coords[1]))
    }

    fn rect(&self) -> Result<(f64, f64, f64, f64)> {
        if self.kind != ProxyKind::Rectangle {
            return Err(RoiError::unsupported_kind("not a rectangle"));
        }
        Ok((self.coords[0], self.coords[1], self.coords[2], self.coords[3]))
    }

    fn circle(&self) -> Result<(f64, f64, f64)> {
        if self.kind != ProxyKind::Circle {
            return Err(RoiError::unsupported_kind("not a circle"));
        }
        Ok((self.coords[0], self.coords[1], self.coords[2]))
    }

    fn points(&self) -> Result<Vec<(f64, f64)>> {
        if self.kind != ProxyKind::Polygon {
            return Err(RoiError::unsupported_kind("not a polygon"));
        }
        Ok(self.coords.chunks(2).map(|c| (c[0], c[1])).collect())
    }

    fn set_title(&mut self, title: &str) {
        self.state.borrow_mut().title = title.to_owned();
    }

    fn set_editable(&mut self, _editable: bool) {}
    fn set_show_label(&mut self, _show_label: bool) {}
}

fn make(kind: ProxyKind, coords: &[f64]) -> (Box<dyn RoiProxyItem>, Rc<RefCell<ItemState>>) {
    let state = Rc::new(RefCell::new(ItemState::default()));
    let item = FakeItem {
        kind,
        coords: coords.to_vec(),
        state: Rc::clone(&state),
    };
    (Box::new(item), state)
}

fn remake(
    kind: ProxyKind,
    coords: &[f64],
    state: &Rc<RefCell<ItemState>>,
) -> Box<dyn RoiProxyItem> {
    Box::new(FakeItem {
        kind,
        coords: coords.to_vec(),
        state: Rc::clone(state),
    })
}

fn signal_with_segments(segments: &[(f64, f64)]) -> SignalObj<Backend> {
    let mut obj = SignalObj::new("sig", None, SignalFrame::default());
    if !segments.is_empty() {
        let mut roi = rroi_core::SignalRoi::new();
        for &(x0, x1) in segments {
            roi.add_roi(RoiShape::new(GeometryShape::Segment { x0, x1 }, false))
                .unwrap();
        }
        obj.set_roi(Some(roi));
    }
    obj
}

#[test]
fn test_seed_specs_are_physical_and_titled() {
    let mut obj = SignalObj::<Backend>::new("sig", None, SignalFrame::new(100.0, 2.0));
    let mut roi = rroi_core::SignalRoi::new();
    roi.add_roi(RoiShape::new(GeometryShape::Segment { x0: 1.0, x1: 4.0 }, true))
        .unwrap();
    obj.set_roi(Some(roi));

    let session = SignalEditSession::new(&obj, false);
    let specs = session.seed_specs(&obj);
    assert_eq!(specs.len(), 1);
    assert_eq!(
        specs[0].geometry,
        GeometryShape::Segment { x0: 102.0, x1: 108.0 }
    );
    assert_eq!(specs[0].title, "ROI00");
    assert!(specs[0].editable);
    assert!(specs[0].show_label);

    let bare = SignalObj::<Backend>::new("bare", None, SignalFrame::default());
    assert!(session.seed_specs(&bare).is_empty());
}

#[test]
fn test_commit_replaces_collection_entirely() {
    let mut obj = signal_with_segments(&[(0.0, 1.0)]);
    let mut session = SignalEditSession::new(&obj, false);

    let (a, a_state) = make(ProxyKind::XRange, &[5.0, 8.0]);
    let (b, b_state) = make(ProxyKind::XRange, &[10.0, 12.0]);
    session.attach_items(vec![a, b]);
    assert_eq!(a_state.borrow().title, "ROI00");
    assert_eq!(b_state.borrow().title, "ROI01");

    session.item_moved();
    session.commit(&mut obj).unwrap();
    assert_eq!(session.state(), SessionState::Committed);

    let roi = obj.roi().unwrap();
    assert_eq!(roi.len(), 2);
    assert_eq!(
        roi.shapes()[0].geometry(),
        &GeometryShape::Segment { x0: 5.0, x1: 8.0 }
    );
    assert!(!roi.shapes()[0].indices());
    assert_eq!(
        roi.shapes()[1].geometry(),
        &GeometryShape::Segment { x0: 10.0, x1: 12.0 }
    );
}

#[test]
fn test_discard_leaves_object_untouched() {
    let mut obj = signal_with_segments(&[(0.0, 1.0), (2.0, 3.0)]);
    let before = obj.roi().cloned();

    let mut session = SignalEditSession::new(&obj, false);
    let (a, _) = make(ProxyKind::XRange, &[5.0, 8.0]);
    let (b, _) = make(ProxyKind::XRange, &[10.0, 12.0]);
    let (c, _) = make(ProxyKind::XRange, &[20.0, 22.0]);
    session.attach_items(vec![a, b, c]);
    session.item_moved();
    session.discard();

    assert_eq!(session.state(), SessionState::Discarded);
    assert_eq!(obj.roi().cloned(), before);
}

#[test]
fn test_commit_with_no_items_removes_collection() {
    let mut obj = signal_with_segments(&[(0.0, 1.0)]);
    let mut session = SignalEditSession::new(&obj, false);
    session.attach_items(Vec::new());
    session.commit(&mut obj).unwrap();
    assert!(obj.roi().is_none());
}

#[test]
fn test_sync_items_renumbers_titles() {
    let obj = signal_with_segments(&[]);
    let mut session = SignalEditSession::new(&obj, false);

    let (a, a_state) = make(ProxyKind::XRange, &[0.0, 1.0]);
    let (b, b_state) = make(ProxyKind::XRange, &[2.0, 3.0]);
    let (c, c_state) = make(ProxyKind::XRange, &[4.0, 5.0]);
    session.attach_items(vec![a, b, c]);
    assert_eq!(c_state.borrow().title, "ROI02");
    assert!(!session.modified());

    // The GUI removed the first item and hands back fresh wrappers for
    // the surviving two.
    session.sync_items(vec![
        remake(ProxyKind::XRange, &[2.0, 3.0], &b_state),
        remake(ProxyKind::XRange, &[4.0, 5.0], &c_state),
    ]);
    assert!(session.modified());
    assert_eq!(a_state.borrow().title, "ROI00");
    assert_eq!(b_state.borrow().title, "ROI00");
    assert_eq!(c_state.borrow().title, "ROI01");
}

#[test]
fn test_disallowed_kinds_are_ignored() {
    let mut obj = signal_with_segments(&[]);
    let mut session = SignalEditSession::new(&obj, false);

    let (range, _) = make(ProxyKind::XRange, &[0.0, 4.0]);
    let (rect, rect_state) = make(ProxyKind::Rectangle, &[0.0, 0.0, 2.0, 2.0]);
    let (other, other_state) = make(ProxyKind::Other, &[]);
    session.attach_items(vec![range, rect, other]);

    // Filtered items never receive a title.
    assert_eq!(rect_state.borrow().title, "");
    assert_eq!(other_state.borrow().title, "");

    session.commit(&mut obj).unwrap();
    let roi = obj.roi().unwrap();
    assert_eq!(roi.len(), 1);
    assert_eq!(roi.shapes()[0].kind(), ShapeKind::Segment);
}

#[test]
fn test_sync_replacement_with_same_count_marks_modified() {
    let obj = ImageObj::<Backend>::new("img", None, ImageFrame::default());
    let mut session = ImageEditSession::new(&obj, false);

    let (rect, _) = make(ProxyKind::Rectangle, &[0.0, 0.0, 2.0, 2.0]);
    session.attach_items(vec![rect]);
    assert!(!session.modified());

    // Remove the rectangle and add a circle in one notification: the
    // count is unchanged but the membership is not.
    let (circle, _) = make(ProxyKind::Circle, &[4.0, 4.0, 3.0]);
    session.sync_items(vec![circle]);
    assert!(session.modified());
    assert!(session.ok_enabled());

    // Handing back the identical list is not a modification.
    let mut fresh = ImageEditSession::new(&obj, false);
    let (a, a_state) = make(ProxyKind::Circle, &[4.0, 4.0, 3.0]);
    fresh.attach_items(vec![a]);
    fresh.sync_items(vec![remake(ProxyKind::Circle, &[4.0, 4.0, 3.0], &a_state)]);
    assert!(!fresh.modified());
}

#[test]
fn test_ok_enabled_gating() {
    let obj = signal_with_segments(&[(0.0, 1.0)]);

    // Extract mode: seeded shapes make the dialog confirmable at once.
    let mut extract = SignalEditSession::new(&obj, true);
    let (a, _) = make(ProxyKind::XRange, &[0.0, 1.0]);
    extract.attach_items(vec![a]);
    assert!(extract.ok_enabled());
    extract.remove_all();
    assert!(!extract.ok_enabled());

    // Edit mode: nothing changed yet, OK stays disabled.
    let mut edit = SignalEditSession::new(&obj, false);
    let (b, _) = make(ProxyKind::XRange, &[0.0, 1.0]);
    edit.attach_items(vec![b]);
    assert!(!edit.ok_enabled());
    edit.set_single_object(true);
    assert!(edit.ok_enabled());
}

#[test]
fn test_range_info_text() {
    let obj = signal_with_segments(&[]);
    let mut session = SignalEditSession::new(&obj, false);
    let (a, _) = make(ProxyKind::XRange, &[10.0, 20.0]);
    let (b, _) = make(ProxyKind::XRange, &[30.0, 40.0]);
    session.attach_items(vec![a, b]);
    assert_eq!(
        session.range_info_text(),
        "ROI00: 10 ≤ x ≤ 20\nROI01: 30 ≤ x ≤ 40"
    );
}

#[test]
fn test_image_commit_kinds_and_single_object() {
    let mut obj = ImageObj::<Backend>::new("img", None, ImageFrame::default());
    let mut session = ImageEditSession::new(&obj, false);

    let (rect, _) = make(ProxyKind::Rectangle, &[0.0, 0.0, 3.0, 4.0]);
    let (circle, _) = make(ProxyKind::Circle, &[5.0, 5.0, 2.0]);
    let (poly, _) = make(ProxyKind::Polygon, &[0.0, 0.0, 4.0, 0.0, 2.0, 3.0]);
    session.attach_items(vec![rect, circle, poly]);
    session.set_single_object(true);
    session.commit(&mut obj).unwrap();

    let roi = obj.roi().unwrap();
    assert_eq!(roi.len(), 3);
    assert!(roi.single_object());
    assert_eq!(roi.shapes()[0].kind(), ShapeKind::Rectangle);
    assert_eq!(roi.shapes()[1].kind(), ShapeKind::Circle);
    assert_eq!(roi.shapes()[2].kind(), ShapeKind::Polygon);
    assert!(roi.shapes().iter().all(RoiShape::indices));
}

#[test]
fn test_commit_after_replacing_the_only_shape() {
    let mut obj = ImageObj::<Backend>::new("img", None, ImageFrame::default());
    let mut roi = rroi_core::ImageRoi::new();
    roi.add_roi(RoiShape::new(
        GeometryShape::Rectangle {
            x0: 0.0,
            y0: 0.0,
            x1: 2.0,
            y1: 2.0,
        },
        true,
    ))
    .unwrap();
    obj.set_roi(Some(roi));

    let mut session = ImageEditSession::new(&obj, false);
    let (rect, _) = make(ProxyKind::Rectangle, &[0.0, 0.0, 2.0, 2.0]);
    session.attach_items(vec![rect]);

    // The user deletes the rectangle and draws a circle instead.
    let (circle, circle_state) = make(ProxyKind::Circle, &[4.0, 4.0, 3.0]);
    session.sync_items(vec![circle]);
    assert_eq!(circle_state.borrow().title, "ROI00");
    assert!(session.modified());

    session.commit(&mut obj).unwrap();
    let roi = obj.roi().unwrap();
    assert_eq!(roi.len(), 1);
    assert_eq!(
        roi.shapes()[0].geometry(),
        &GeometryShape::Circle {
            xc: 4.0,
            yc: 4.0,
            r: 3.0,
        }
    );
}

#[test]
fn test_commit_error_aborts_before_mutation() {
    let mut obj = ImageObj::<Backend>::new("img", None, ImageFrame::default());
    let mut roi = rroi_core::ImageRoi::new();
    roi.add_roi(RoiShape::new(
        GeometryShape::Rectangle {
            x0: 0.0,
            y0: 0.0,
            x1: 2.0,
            y1: 2.0,
        },
        true,
    ))
    .unwrap();
    obj.set_roi(Some(roi.clone()));

    let mut session = ImageEditSession::new(&obj, false);
    let (good, _) = make(ProxyKind::Rectangle, &[0.0, 0.0, 1.0, 1.0]);
    let (bad, _) = make(ProxyKind::Circle, &[5.0, 5.0, -2.0]);
    session.attach_items(vec![good, bad]);

    assert!(matches!(
        session.commit(&mut obj),
        Err(RoiError::InvalidGeometry(_))
    ));
    // The object still holds its previous collection and the session
    // stays editable.
    assert_eq!(obj.roi(), Some(&roi));
    assert_eq!(session.state(), SessionState::Editing);
}
