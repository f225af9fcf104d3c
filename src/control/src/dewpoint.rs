use micromath::F32Ext;

struct MagnusCoefficients {
    a: f32,
    b: f32,
}

static MAGNUS: MagnusCoefficients = MagnusCoefficients {
    a: 17.62,
    b: 243.12,
};

// Magnus approximation of the dew point, degrees Fahrenheit in and out.
//
//              b * gamma                            a * t
// td = ------------------------    gamma = ln(rh) + ------
//            a - gamma                              b + t
//
// with t and td in Celsius and rh as a fraction.
pub fn dew_point_f(dry_bulb_f: f32, humidity_pct: f32) -> f32 {
    let rh = humidity_pct.clamp(1.0, 100.0) / 100.0;
    let t = (dry_bulb_f - 32.0) * 5.0 / 9.0;

    let gamma = rh.ln() + MAGNUS.a * t / (MAGNUS.b + t);
    let td = MAGNUS.b * gamma / (MAGNUS.a - gamma);

    td * 9.0 / 5.0 + 32.0
}
