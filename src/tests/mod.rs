use super::*;

mod controller_behaviors;
mod dom_class_and_style;

const LANDING_PAGE: &str = r#"
<!DOCTYPE html>
<html>
  <body>
    <nav>
      <button id='menu' type='button' onclick='toggleMobileNav()'>Menu</button>
      <ul id='mobileNav' class='mobile-nav'><li>Home</li></ul>
    </nav>
    <div id='error' class='alert alert-danger'>Model failed to load</div>
    <section id='hero' class='heroCard'>
      <h1>Loan check</h1>
    </section>
    <form id='predict' class='glassCard' method='post'>
      <input id='age' name='Age' type='number'>
      <select id='education' name='Education'><option>PhD</option></select>
      <textarea id='notes'></textarea>
      <button id='submit' type='submit'>Predict</button>
    </form>
  </body>
</html>
"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn loaded(html: &str, config: InteractionConfig) -> Result<Harness> {
    init_tracing();
    let mut h = Harness::from_html(html)?;
    h.dom_content_loaded(&PageController::new(config)?)?;
    Ok(h)
}
