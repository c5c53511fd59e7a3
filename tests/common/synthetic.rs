#![allow(dead_code)]

use image::{Rgb, RgbImage};
use photocard::Region;

pub const PAPER: Rgb<u8> = Rgb([242, 240, 236]);

/// Card-sized regions laid out on a regular grid, row by row.
pub fn grid_layout(
    cols: u32,
    rows: u32,
    card_w: u32,
    card_h: u32,
    gap: u32,
    margin: u32,
) -> Vec<Region> {
    let mut regions = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            regions.push(Region::new(
                margin + c * (card_w + gap),
                margin + r * (card_h + gap),
                card_w,
                card_h,
            ));
        }
    }
    regions
}

/// Canvas size that fits `grid_layout` with the same arguments.
pub fn grid_canvas(cols: u32, rows: u32, card_w: u32, card_h: u32, gap: u32, margin: u32) -> (u32, u32) {
    (
        2 * margin + cols * card_w + (cols - 1) * gap,
        2 * margin + rows * card_h + (rows - 1) * gap,
    )
}

/// Dark, textured card pixel; every value stays well below the paper.
pub fn card_pixel(seed: u32, x: u32, y: u32) -> Rgb<u8> {
    let v = 25 + ((x * 7 + y * 13 + seed * 31) % 60) as u8;
    Rgb([v, v / 2 + 20, v.saturating_add(15)])
}

/// Paint `cards` onto a paper-coloured canvas.
pub fn template_with_cards(width: u32, height: u32, cards: &[Region]) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, PAPER);
    for (seed, card) in cards.iter().enumerate() {
        fill(&mut img, *card, |x, y| card_pixel(seed as u32, x, y));
    }
    img
}

pub fn fill(img: &mut RgbImage, region: Region, color: impl Fn(u32, u32) -> Rgb<u8>) {
    for y in region.y..region.bottom() {
        for x in region.x..region.right() {
            img.put_pixel(x, y, color(x, y));
        }
    }
}
