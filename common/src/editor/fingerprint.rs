//! Structural fingerprint used for dirty tracking.
//!
//! An MD5 digest over the template name and every section and field, in
//! order, ids included. Timestamps are left out. Replacing a field with an
//! identical one under a new id therefore counts as a change.

use md5::{Context, Digest};

use crate::model::field::{FieldDescriptor, FieldKind, LabelStyle};
use crate::model::template::Template;

pub(crate) type Fingerprint = Digest;

pub(crate) fn fingerprint(template: &Template) -> Fingerprint {
    let mut ctx = Context::new();
    feed_str(&mut ctx, &template.name);
    feed_len(&mut ctx, template.sections.len());
    for section in &template.sections {
        feed_str(&mut ctx, &section.id);
        feed_str(&mut ctx, &section.title);
        feed_len(&mut ctx, section.fields.len());
        for field in &section.fields {
            feed_field(&mut ctx, field);
        }
    }
    ctx.finalize()
}

fn feed_field(ctx: &mut Context, field: &FieldDescriptor) {
    feed_str(ctx, &field.id);
    feed_str(ctx, &field.label);
    match &field.kind {
        FieldKind::Label { label_style } => {
            ctx.consume([0u8]);
            ctx.consume([match label_style {
                LabelStyle::H1 => 1u8,
                LabelStyle::H2 => 2,
                LabelStyle::H3 => 3,
            }]);
        }
        FieldKind::Text { required } => ctx.consume([1u8, u8::from(*required)]),
        FieldKind::Number { required } => ctx.consume([2u8, u8::from(*required)]),
        FieldKind::Boolean { required } => ctx.consume([3u8, u8::from(*required)]),
        FieldKind::Enum { required, options } => {
            ctx.consume([4u8, u8::from(*required)]);
            feed_len(ctx, options.len());
            for option in options.iter() {
                feed_str(ctx, option);
            }
        }
    }
}

// Length-prefixed so adjacent strings cannot run into each other.
fn feed_str(ctx: &mut Context, value: &str) {
    feed_len(ctx, value.len());
    ctx.consume(value.as_bytes());
}

fn feed_len(ctx: &mut Context, len: usize) {
    ctx.consume((len as u64).to_le_bytes());
}
