use std::env;

use qrlite::{ECLevel, QRBuilder, Version};

// Builds the symbol a payment terminal would show for a checkout link and
// prints it to the terminal. Pass a path to also save the 240px canvas.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let link = args
        .next()
        .unwrap_or_else(|| "https://www.mercadopago.com.ar/checkout/v1/redirect?pref=1a2".into());

    let qr = QRBuilder::new(link.as_bytes())
        .version(Version::new(15)?)
        .ec_level(ECLevel::L)
        .build()?;

    println!("{}", qr.metadata());
    println!("{}", qr.to_str(1));

    if let Some(path) = args.next() {
        qr.render_canvas(240)?.save(&path)?;
        println!("Saved canvas to {path}");
    }
    Ok(())
}
